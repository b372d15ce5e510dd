//! The bootstrap-and-protect workflow.
//!
//! This module provides the [`ProtectionWorkflow`] component: the fixed
//! sequence of remote mutations that brings a freshly created repository's
//! default branch into a documented and protected state, and records the
//! outcome as an audit issue.
//!
//! The sequence is:
//!
//! 1. Resolve `refs/heads/{default_branch}`. A missing reference is an
//!    expected state (the repository was created without an initial commit),
//!    not an error.
//! 2. Either initialize the branch with a README (missing reference) or
//!    commit an updated README on top of the current tip (existing
//!    reference).
//! 3. Apply branch protection.
//! 4. Create an audit issue announcing the result.
//!
//! No step is retried within a run; the webhook transport's redelivery is
//! the implicit retry mechanism. Re-running the workflow for an already
//! protected repository is safe but creates a second audit issue.

use std::sync::Arc;

use chrono::Utc;
use github_client::models::{CommitAuthor, CommitIdentity, CommitPayload, TreeEntryPayload};
use github_client::{CreateFilePayload, Error as ClientError, RepositoryClient};
use tracing::{error, info, warn};

use crate::config::{self, WardenConfig};
use crate::events::RepositoryCreatedEvent;
use crate::reporter::IssueReporter;

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;

/// Title of the audit issue created after protection succeeds.
pub const AUDIT_ISSUE_TITLE: &str = "New Repository Protection Applied Successfully";

/// Title of the diagnostic issue created when branch initialization fails.
pub const DIAGNOSTIC_ISSUE_TITLE: &str = "FAILED to Apply Repository Protection!";

/// The workflow step at which a transient failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    /// Fetching the default branch reference
    RefFetch,
    /// Initializing an absent default branch via the contents API
    BranchInit,
    /// Building the tree for the README commit
    TreeBuild,
    /// Fetching the parent commit
    ParentFetch,
    /// Fetching the authenticated user for the commit author
    UserFetch,
    /// Creating the commit object
    CommitCreate,
    /// Fast-forwarding the branch reference
    RefUpdate,
    /// Applying branch protection
    Protection,
}

impl WorkflowStep {
    /// Returns the step name used in logs and failure causes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RefFetch => "ref-fetch",
            Self::BranchInit => "branch-init",
            Self::TreeBuild => "tree-build",
            Self::ParentFetch => "parent-fetch",
            Self::UserFetch => "user-fetch",
            Self::CommitCreate => "commit-create",
            Self::RefUpdate => "ref-update",
            Self::Protection => "protection",
        }
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tagged result of one workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The default branch existed; a README commit landed and protection was applied
    Protected,

    /// The default branch was absent; it was initialized and protection was applied
    InitializedAndProtected,

    /// The default branch was absent and could not be initialized; a
    /// diagnostic issue was posted and protection was never attempted
    FailedNoDefaultBranch,

    /// A gateway call failed; the run aborted at the named step with no
    /// compensating issue
    FailedTransient {
        /// The step that failed
        step: WorkflowStep,
        /// The rendered failure cause
        cause: String,
    },
}

impl WorkflowOutcome {
    /// Returns true when protection was applied.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Protected | Self::InitializedAndProtected)
    }
}

/// Orchestrates the bootstrap-and-protect sequence for one repository.
///
/// The workflow holds no mutable state of its own; each [`run`] owns its
/// local branch tip exclusively, so concurrent runs for different
/// repositories are safe. Two concurrent runs for the same repository are
/// not defended against; the platform delivers at most one creation event
/// per repository.
///
/// [`run`]: ProtectionWorkflow::run
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use branch_warden_core::{ProtectionWorkflow, WardenConfig};
/// use github_client::{create_token_client, GitHubClient};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let octocrab = create_token_client("ghp_token")?;
/// let client = Arc::new(GitHubClient::new(octocrab));
/// let config = WardenConfig::new("acme").with_required_reviews(2);
/// let workflow = ProtectionWorkflow::new(client, config);
/// # Ok(())
/// # }
/// ```
pub struct ProtectionWorkflow {
    /// Gateway for all remote repository operations
    client: Arc<dyn RepositoryClient>,

    /// Reporter for audit and diagnostic issues
    reporter: IssueReporter,

    /// Immutable workflow configuration
    config: WardenConfig,
}

impl ProtectionWorkflow {
    /// Creates a new workflow over the given gateway and configuration.
    pub fn new(client: Arc<dyn RepositoryClient>, config: WardenConfig) -> Self {
        let reporter = IssueReporter::new(client.clone());
        Self {
            client,
            reporter,
            config,
        }
    }

    /// Runs the bootstrap-and-protect sequence for one created repository.
    ///
    /// Never returns an error; every failure mode is encoded in the
    /// returned [`WorkflowOutcome`].
    pub async fn run(&self, event: &RepositoryCreatedEvent) -> WorkflowOutcome {
        let org = &event.organization;
        let repo = &event.repository;
        let branch = &event.default_branch;

        info!(
            delivery_id = event.delivery_id,
            org = org,
            repo = repo,
            branch = branch,
            "Starting protection workflow"
        );

        let git_ref = format!("heads/{}", branch);

        let initialized = match self.client.get_ref(org, repo, &git_ref).await {
            Ok(tip) => {
                info!(tip = tip, "Default branch exists, committing README update");
                if let Err((step, e)) = self.push_readme_commit(org, repo, &git_ref, &tip).await {
                    error!(
                        delivery_id = event.delivery_id,
                        step = %step,
                        error = %e,
                        "Workflow aborted before protection"
                    );
                    return WorkflowOutcome::FailedTransient {
                        step,
                        cause: e.to_string(),
                    };
                }
                false
            }
            Err(ClientError::NotFound) => {
                // Expected for repositories created without an initial commit.
                info!("Default branch is absent, initializing it with a README");
                if let Err(e) = self.initialize_branch(org, repo, branch).await {
                    error!(
                        delivery_id = event.delivery_id,
                        error = %e,
                        "Branch initialization failed"
                    );
                    let body = self.diagnostic_issue_body(branch);
                    if self
                        .reporter
                        .report(org, repo, DIAGNOSTIC_ISSUE_TITLE, &body)
                        .await
                        .is_err()
                    {
                        // Already logged by the reporter; nothing further to do.
                    }
                    return WorkflowOutcome::FailedNoDefaultBranch;
                }
                true
            }
            Err(e) => {
                // The repository may not exist yet or credentials may be
                // invalid; diagnosing that is not this workflow's job.
                error!(
                    delivery_id = event.delivery_id,
                    error = %e,
                    "Failed to fetch default branch reference"
                );
                return WorkflowOutcome::FailedTransient {
                    step: WorkflowStep::RefFetch,
                    cause: e.to_string(),
                };
            }
        };

        let policy = self.config.protection_policy();
        if let Err(e) = self
            .client
            .update_branch_protection(org, repo, branch, &policy)
            .await
        {
            // No audit issue: the stated goal did not occur and a false
            // positive audit record must never be emitted.
            error!(
                delivery_id = event.delivery_id,
                error = %e,
                "Failed to apply branch protection"
            );
            return WorkflowOutcome::FailedTransient {
                step: WorkflowStep::Protection,
                cause: e.to_string(),
            };
        }

        info!(
            required_reviews = self.config.required_reviews,
            "Branch protection applied"
        );

        // Best effort: protection already succeeded and is the primary
        // objective, so a failure here does not fail the run.
        let body = self.audit_issue_body(branch);
        if let Err(e) = self.reporter.report(org, repo, AUDIT_ISSUE_TITLE, &body).await {
            warn!(
                delivery_id = event.delivery_id,
                error = %e,
                "Protection applied but the audit issue could not be created"
            );
        }

        if initialized {
            WorkflowOutcome::InitializedAndProtected
        } else {
            WorkflowOutcome::Protected
        }
    }

    /// Initializes an absent default branch with a single README commit.
    async fn initialize_branch(
        &self,
        org: &str,
        repo: &str,
        branch: &str,
    ) -> Result<(), ClientError> {
        let committer = match self.client.get_authenticated_user().await {
            Ok(user) => CommitIdentity {
                email: self.effective_email(user.email),
                name: user.login,
            },
            Err(e) => {
                // The contents API accepts a committer without a matching
                // account; fall back rather than fail the initialization.
                warn!(error = %e, "Could not resolve authenticated user, using fallback identity");
                CommitIdentity {
                    name: self.config.reviewer_mention.clone(),
                    email: self.config.fallback_committer_email.clone(),
                }
            }
        };

        let payload = CreateFilePayload {
            path: "README.md".to_string(),
            content: config::readme_body(repo).into_bytes(),
            branch: branch.to_string(),
            message: commit_message(repo),
            committer,
        };
        self.client.create_file(org, repo, &payload).await
    }

    /// Commits the README document on top of the current branch tip and
    /// fast-forwards the reference.
    ///
    /// The reference update targets the commit created here, so protection
    /// is never applied to a tip older than the content commit.
    async fn push_readme_commit(
        &self,
        org: &str,
        repo: &str,
        git_ref: &str,
        tip: &str,
    ) -> Result<(), (WorkflowStep, ClientError)> {
        let entries = vec![TreeEntryPayload::blob("README.md", config::readme_body(repo))];
        let tree_sha = self
            .client
            .create_tree(org, repo, tip, &entries)
            .await
            .map_err(|e| (WorkflowStep::TreeBuild, e))?;

        let parent = self
            .client
            .get_commit(org, repo, tip)
            .await
            .map_err(|e| (WorkflowStep::ParentFetch, e))?;

        let user = self
            .client
            .get_authenticated_user()
            .await
            .map_err(|e| (WorkflowStep::UserFetch, e))?;
        let email = self.effective_email(user.email);

        let payload = CommitPayload {
            message: commit_message(repo),
            tree: tree_sha,
            parents: vec![parent.sha],
            author: CommitAuthor {
                name: user.login,
                email,
                date: Utc::now(),
            },
        };
        let new_sha = self
            .client
            .create_commit(org, repo, &payload)
            .await
            .map_err(|e| (WorkflowStep::CommitCreate, e))?;

        self.client
            .update_ref(org, repo, git_ref, &new_sha, false)
            .await
            .map_err(|e| (WorkflowStep::RefUpdate, e))?;

        info!(commit_sha = new_sha, "README commit landed on the default branch");
        Ok(())
    }

    /// Substitutes the configured placeholder when the user's email is private.
    fn effective_email(&self, email: Option<String>) -> String {
        match email {
            Some(e) if !e.is_empty() => e,
            _ => self.config.fallback_committer_email.clone(),
        }
    }

    fn audit_issue_body(&self, branch: &str) -> String {
        format!(
            "The {} branch was set up and protected so that only reviewed code can be merged.\n\n\
             Required approving reviews: {}\n\n\
             CC @{}",
            branch, self.config.required_reviews, self.config.reviewer_mention
        )
    }

    fn diagnostic_issue_body(&self, branch: &str) -> String {
        format!(
            "The default branch `{}` could not be initialized. Did repository creation include a README?\n\n\
             Branch protection was NOT applied; manual intervention is required.\n\n\
             CC @{}",
            branch, self.config.reviewer_mention
        )
    }
}

/// The commit message used for both branch initialization and README updates.
fn commit_message(repo_name: &str) -> String {
    format!("Setting up Branch Protections for {}", repo_name)
}
