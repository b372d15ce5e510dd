//! Workflow configuration.
//!
//! This module provides the [`WardenConfig`] struct: the immutable
//! configuration constructed once at startup and passed into the workflow
//! constructor. Configuration is never read from ambient global state.

use github_client::branch_protection::{BranchProtectionRequest, RequiredPullRequestReviews};
use tracing::warn;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Fallback for the required approving review count when the configured
/// value is missing, unparsable, or zero.
pub const DEFAULT_REQUIRED_REVIEWS: u32 = 3;

/// Fallback handle mentioned in audit and diagnostic issues.
pub const DEFAULT_REVIEWER_MENTION: &str = "repo-admins";

/// Fallback committer email used when the authenticated user's email is
/// marked private.
pub const DEFAULT_FALLBACK_EMAIL: &str = "private@email.com";

/// Immutable configuration for the protection workflow.
///
/// Constructed once at startup (typically from the environment by the server
/// binary) and passed by value into [`crate::ProtectionWorkflow`].
///
/// # Examples
///
/// ```rust
/// use branch_warden_core::WardenConfig;
///
/// let config = WardenConfig::new("acme").with_required_reviews(2);
/// assert_eq!(config.required_reviews, 2);
/// ```
#[derive(Debug, Clone)]
pub struct WardenConfig {
    /// The organization the warden governs; used when the event payload
    /// does not carry an organization itself.
    pub organization: String,

    /// Minimum number of approving reviews required before merging. Always >= 1.
    pub required_reviews: u32,

    /// Handle (without `@`) mentioned in audit and diagnostic issues.
    pub reviewer_mention: String,

    /// Committer email used when the authenticated user's email is private.
    pub fallback_committer_email: String,
}

impl WardenConfig {
    /// Creates a configuration for the given organization with documented defaults.
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            required_reviews: DEFAULT_REQUIRED_REVIEWS,
            reviewer_mention: DEFAULT_REVIEWER_MENTION.to_string(),
            fallback_committer_email: DEFAULT_FALLBACK_EMAIL.to_string(),
        }
    }

    /// Sets the required review count, keeping the default when the value is zero.
    pub fn with_required_reviews(mut self, count: u32) -> Self {
        if count >= 1 {
            self.required_reviews = count;
        } else {
            warn!(
                fallback = DEFAULT_REQUIRED_REVIEWS,
                "Ignoring required review count of zero"
            );
        }
        self
    }

    /// Sets the handle mentioned in audit and diagnostic issues.
    pub fn with_reviewer_mention(mut self, handle: impl Into<String>) -> Self {
        self.reviewer_mention = handle.into();
        self
    }

    /// Sets the committer email used when the authenticated user's email is private.
    pub fn with_fallback_committer_email(mut self, email: impl Into<String>) -> Self {
        self.fallback_committer_email = email.into();
        self
    }

    /// Parses a raw required-review value, falling back to
    /// [`DEFAULT_REQUIRED_REVIEWS`] when the value is absent, unparsable, or zero.
    pub fn parse_required_reviews(raw: Option<&str>) -> u32 {
        match raw.map(str::trim) {
            None | Some("") => DEFAULT_REQUIRED_REVIEWS,
            Some(value) => match value.parse::<u32>() {
                Ok(count) if count >= 1 => count,
                Ok(_) | Err(_) => {
                    warn!(
                        value = value,
                        fallback = DEFAULT_REQUIRED_REVIEWS,
                        "Invalid required review count, using fallback"
                    );
                    DEFAULT_REQUIRED_REVIEWS
                }
            },
        }
    }

    /// Builds the branch protection policy this configuration requires.
    ///
    /// Code owner reviews are always mandatory, stale reviews are never
    /// dismissed, and force pushes are never allowed.
    pub fn protection_policy(&self) -> BranchProtectionRequest {
        BranchProtectionRequest {
            required_pull_request_reviews: RequiredPullRequestReviews {
                required_approving_review_count: self.required_reviews,
                require_code_owner_reviews: true,
                dismiss_stale_reviews: false,
            },
            enforce_admins: None,
            required_status_checks: None,
            restrictions: None,
            allow_force_pushes: Some(false),
        }
    }
}

/// The README document committed to every bootstrapped default branch.
pub fn readme_body(repo_name: &str) -> String {
    format!(
        "# {}\nYour Organization loves documentation, don't forget to update this file with specific information about this project!\n",
        repo_name
    )
}
