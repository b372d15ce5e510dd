//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for making authenticated requests to GitHub
//! using a personal access token, and the [`RepositoryClient`] capability
//! trait that the orchestration layer consumes. The trait covers the Git-data
//! primitives (refs, trees, commits) plus the REST operations needed to
//! bootstrap and protect a repository's default branch.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use octocrab::{Octocrab, Result as OctocrabResult};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod models;
use models::{
    AuthenticatedUser, CommitIdentity, CommitObject, CommitPayload, CreatedCommit, CreatedTree,
    GitReference, Issue, TreeEntryPayload,
};

pub mod branch_protection;
pub use branch_protection::{BranchProtectionRequest, RequiredPullRequestReviews};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// A client for interacting with the GitHub API, authenticated with a
/// personal access token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` wrapping an authenticated `Octocrab` instance.
    ///
    /// Use [`create_token_client`] to build the underlying client.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

/// The payload for creating a single file on a branch via the contents API.
///
/// Creating a file on a branch that has no commits yet is the only way to
/// initialize that branch through the REST API, so this payload doubles as
/// the branch-initialization primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateFilePayload {
    /// Path of the file within the repository
    pub path: String,

    /// Raw file content; base64 encoding is handled by the client
    pub content: Vec<u8>,

    /// The branch to commit to (created when absent)
    pub branch: String,

    /// The commit message
    pub message: String,

    /// The committer identity recorded on the commit
    pub committer: CommitIdentity,
}

/// Capability interface over the Git-data and REST primitives needed to
/// bring a repository's default branch into a protected state.
///
/// The orchestration layer depends on this trait, never on [`GitHubClient`]
/// directly, so tests can substitute a recording mock.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Fetches a Git reference and returns the SHA it points at.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `git_ref` - The reference, without the `refs/` prefix (e.g. `heads/main`).
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` when the reference does not exist, which is
    /// an expected state for a repository created without an initial commit.
    /// Any other failure maps to `Error::InvalidResponse`.
    async fn get_ref(&self, owner: &str, repo: &str, git_ref: &str) -> Result<String, Error>;

    /// Creates a Git tree rooted at `base_sha` containing the given entries.
    ///
    /// Returns the SHA of the new tree.
    ///
    /// # Errors
    /// Returns an `Error::InvalidResponse` if the API call fails.
    async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_sha: &str,
        entries: &[TreeEntryPayload],
    ) -> Result<String, Error>;

    /// Fetches a commit object by SHA.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for unknown SHAs, `Error::InvalidResponse`
    /// for any other failure.
    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<CommitObject, Error>;

    /// Creates a new commit object from the given descriptor.
    ///
    /// Returns the SHA of the new commit.
    ///
    /// # Errors
    /// Returns an `Error::InvalidResponse` if the API call fails.
    async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        payload: &CommitPayload,
    ) -> Result<String, Error>;

    /// Moves a reference to point at `sha`.
    ///
    /// With `force = false` the update must be a fast-forward, which is the
    /// only mode the protection workflow uses.
    ///
    /// # Errors
    /// Returns an `Error::InvalidResponse` if the API call fails.
    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        sha: &str,
        force: bool,
    ) -> Result<(), Error>;

    /// Creates a single file on a branch via the contents API.
    ///
    /// When the branch has no commits yet, this creates the branch with a
    /// single parentless commit.
    ///
    /// # Errors
    /// Returns an `Error::InvalidResponse` if the API call fails.
    async fn create_file(
        &self,
        owner: &str,
        repo: &str,
        payload: &CreateFilePayload,
    ) -> Result<(), Error>;

    /// Submits the branch protection configuration for a branch.
    ///
    /// This is a full replace with set semantics: submitting the same policy
    /// twice is a safe overwrite.
    ///
    /// # Errors
    /// Returns an `Error::InvalidResponse` if the API call fails.
    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        policy: &BranchProtectionRequest,
    ) -> Result<(), Error>;

    /// Creates an issue on a repository.
    ///
    /// # Errors
    /// Returns an `Error::InvalidResponse` if the API call fails.
    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> Result<Issue, Error>;

    /// Returns the user the client is authenticated as.
    ///
    /// The email is absent when the user has marked it private.
    ///
    /// # Errors
    /// Returns an `Error::InvalidResponse` if the API call fails.
    async fn get_authenticated_user(&self) -> Result<AuthenticatedUser, Error>;
}

#[derive(Serialize)]
struct CreateTreeBody<'a> {
    base_tree: &'a str,
    tree: &'a [TreeEntryPayload],
}

#[derive(Serialize)]
struct UpdateRefBody<'a> {
    sha: &'a str,
    force: bool,
}

#[derive(Serialize)]
struct ContentsPutBody<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    committer: &'a CommitIdentity,
}

#[derive(Serialize)]
struct CreateIssueBody<'a> {
    title: &'a str,
    body: &'a str,
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, git_ref = %git_ref))]
    async fn get_ref(&self, owner: &str, repo: &str, git_ref: &str) -> Result<String, Error> {
        let path = format!("/repos/{}/{}/git/ref/{}", owner, repo, git_ref);
        let response: OctocrabResult<GitReference> = self.client.get(path, None::<&()>).await;
        match response {
            Ok(reference) => {
                debug!(sha = reference.object.sha, "Resolved reference");
                Ok(reference.object.sha)
            }
            Err(e) => Err(map_octocrab_error("Failed to get reference", e)),
        }
    }

    #[instrument(skip(self, entries), fields(owner = %owner, repo = %repo, base_sha = %base_sha))]
    async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_sha: &str,
        entries: &[TreeEntryPayload],
    ) -> Result<String, Error> {
        let path = format!("/repos/{}/{}/git/trees", owner, repo);
        let body = CreateTreeBody {
            base_tree: base_sha,
            tree: entries,
        };
        let response: OctocrabResult<CreatedTree> = self.client.post(path, Some(&body)).await;
        match response {
            Ok(tree) => {
                info!(
                    tree_sha = tree.sha,
                    entry_count = entries.len(),
                    "Created tree"
                );
                Ok(tree.sha)
            }
            Err(e) => Err(map_octocrab_error("Failed to create tree", e)),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, sha = %sha))]
    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<CommitObject, Error> {
        let path = format!("/repos/{}/{}/git/commits/{}", owner, repo, sha);
        let response: OctocrabResult<CommitObject> = self.client.get(path, None::<&()>).await;
        match response {
            Ok(commit) => Ok(commit),
            Err(e) => Err(map_octocrab_error("Failed to get commit", e)),
        }
    }

    #[instrument(skip(self, payload), fields(owner = %owner, repo = %repo))]
    async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        payload: &CommitPayload,
    ) -> Result<String, Error> {
        let path = format!("/repos/{}/{}/git/commits", owner, repo);
        let response: OctocrabResult<CreatedCommit> = self.client.post(path, Some(payload)).await;
        match response {
            Ok(commit) => {
                info!(commit_sha = commit.sha, "Created commit");
                Ok(commit.sha)
            }
            Err(e) => Err(map_octocrab_error("Failed to create commit", e)),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, git_ref = %git_ref, sha = %sha))]
    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        sha: &str,
        force: bool,
    ) -> Result<(), Error> {
        let path = format!("/repos/{}/{}/git/refs/{}", owner, repo, git_ref);
        let body = UpdateRefBody { sha, force };
        let response: OctocrabResult<GitReference> = self.client.patch(path, Some(&body)).await;
        match response {
            Ok(_) => {
                info!("Advanced reference");
                Ok(())
            }
            Err(e) => Err(map_octocrab_error("Failed to update reference", e)),
        }
    }

    #[instrument(skip(self, payload), fields(owner = %owner, repo = %repo, path = %payload.path, branch = %payload.branch))]
    async fn create_file(
        &self,
        owner: &str,
        repo: &str,
        payload: &CreateFilePayload,
    ) -> Result<(), Error> {
        let path = format!("/repos/{}/{}/contents/{}", owner, repo, payload.path);
        let body = ContentsPutBody {
            message: &payload.message,
            content: BASE64.encode(&payload.content),
            branch: &payload.branch,
            committer: &payload.committer,
        };
        let response: OctocrabResult<serde_json::Value> = self.client.put(path, Some(&body)).await;
        match response {
            Ok(_) => {
                info!("Created file");
                Ok(())
            }
            Err(e) => Err(map_octocrab_error("Failed to create file", e)),
        }
    }

    #[instrument(skip(self, policy), fields(owner = %owner, repo = %repo, branch = %branch))]
    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        policy: &BranchProtectionRequest,
    ) -> Result<(), Error> {
        let path = format!("/repos/{}/{}/branches/{}/protection", owner, repo, branch);
        let response: OctocrabResult<serde_json::Value> = self.client.put(path, Some(policy)).await;
        match response {
            Ok(_) => {
                info!(
                    required_reviews =
                        policy.required_pull_request_reviews.required_approving_review_count,
                    "Applied branch protection"
                );
                Ok(())
            }
            Err(e) => Err(map_octocrab_error("Failed to update branch protection", e)),
        }
    }

    #[instrument(skip(self, body), fields(owner = %owner, repo = %repo, title = %title))]
    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> Result<Issue, Error> {
        let path = format!("/repos/{}/{}/issues", owner, repo);
        let request = CreateIssueBody { title, body };
        let response: OctocrabResult<Issue> = self.client.post(path, Some(&request)).await;
        match response {
            Ok(issue) => {
                info!(issue_number = issue.number, "Created issue");
                Ok(issue)
            }
            Err(e) => Err(map_octocrab_error("Failed to create issue", e)),
        }
    }

    #[instrument(skip(self))]
    async fn get_authenticated_user(&self) -> Result<AuthenticatedUser, Error> {
        let response: OctocrabResult<AuthenticatedUser> =
            self.client.get("/user", None::<&()>).await;
        match response {
            Ok(user) => Ok(user),
            Err(e) => Err(map_octocrab_error("Failed to get authenticated user", e)),
        }
    }
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Errors
/// Returns an `Error::AuthError` if the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &str) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build Octocrab client with personal access token");
            Error::AuthError("Failed to build client with the personal access token.".to_string())
        })
}

/// Classifies an octocrab error, logging the detail before collapsing it to
/// the crate error taxonomy. 404 responses become `Error::NotFound` without
/// an error-level log entry because callers treat them as an expected branch.
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    if let octocrab::Error::GitHub { ref source, .. } = e {
        if source.status_code == http::StatusCode::NOT_FOUND {
            debug!(error_message = source.message, "{}. Resource not found", message);
            return Error::NotFound;
        }
        if source.status_code == http::StatusCode::FORBIDDEN
            && source.message.to_ascii_lowercase().contains("rate limit")
        {
            error!(error_message = source.message, "{}. Rate limit exceeded", message);
            return Error::RateLimitExceeded;
        }
    }
    log_octocrab_error(message, e);
    Error::InvalidResponse
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => error!(
            error_message = source.message,
            status = %source.status_code,
            backtrace = backtrace.to_string(),
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidUtf8 { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. The message wasn't valid UTF-8.",
            message,
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
