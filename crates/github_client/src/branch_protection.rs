//! Branch protection domain types.
//!
//! This module contains the request types submitted to GitHub's branch
//! protection endpoint (`PUT /repos/{owner}/{repo}/branches/{branch}/protection`).

use serde::Serialize;

#[cfg(test)]
#[path = "branch_protection_tests.rs"]
mod tests;

/// The full branch protection configuration submitted for a branch.
///
/// GitHub requires `required_status_checks` and `restrictions` to be present
/// in the request body, as `null` when unused, so these fields serialize
/// explicitly instead of being skipped.
///
/// # Examples
///
/// ```rust
/// use github_client::{BranchProtectionRequest, RequiredPullRequestReviews};
///
/// let request = BranchProtectionRequest {
///     required_pull_request_reviews: RequiredPullRequestReviews {
///         required_approving_review_count: 2,
///         require_code_owner_reviews: true,
///         dismiss_stale_reviews: false,
///     },
///     enforce_admins: None,
///     required_status_checks: None,
///     restrictions: None,
///     allow_force_pushes: Some(false),
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BranchProtectionRequest {
    /// Pull request review requirements before merging
    pub required_pull_request_reviews: RequiredPullRequestReviews,

    /// Whether the rules also apply to repository administrators
    pub enforce_admins: Option<bool>,

    /// Required status checks; not used by this workflow
    pub required_status_checks: Option<StatusChecksPolicy>,

    /// Push restrictions; not used by this workflow
    pub restrictions: Option<PushRestrictions>,

    /// Whether force pushes to the branch are permitted
    pub allow_force_pushes: Option<bool>,
}

/// Pull request review enforcement settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequiredPullRequestReviews {
    /// Required number of approving reviews before merging
    pub required_approving_review_count: u32,

    /// Whether code owner reviews are required
    pub require_code_owner_reviews: bool,

    /// Whether stale reviews are dismissed when new commits are pushed
    pub dismiss_stale_reviews: bool,
}

/// Status check requirements. Currently always submitted as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusChecksPolicy {
    /// Whether branches must be up to date before merging
    pub strict: bool,

    /// Status check contexts that must pass
    pub contexts: Vec<String>,
}

/// Push restrictions. Currently always submitted as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PushRestrictions {
    /// User logins allowed to push
    pub users: Vec<String>,

    /// Team slugs allowed to push
    pub teams: Vec<String>,
}
