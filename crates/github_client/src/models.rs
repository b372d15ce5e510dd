//! # Models
//!
//! This module contains the data models used for the Git-data and REST
//! operations the client performs: references, trees, commits, issues, and
//! the authenticated user.
//!
//! These are partial models. GitHub returns many more fields than the
//! orchestration layer consumes, and serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A Git reference as returned by the Git-data API.
///
/// # Examples
///
/// ```rust
/// use github_client::models::GitReference;
///
/// let json = r#"{
///     "ref": "refs/heads/main",
///     "object": { "sha": "abc123", "type": "commit" }
/// }"#;
///
/// let reference: GitReference = serde_json::from_str(json).unwrap();
/// assert_eq!(reference.object.sha, "abc123");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GitReference {
    /// The fully qualified reference name (e.g. `refs/heads/main`)
    #[serde(rename = "ref")]
    pub ref_name: String,

    /// The Git object the reference points at
    pub object: GitObject,
}

/// The object a Git reference points at.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GitObject {
    /// The SHA of the object
    pub sha: String,

    /// The object type (`commit` for branch refs)
    #[serde(rename = "type")]
    pub object_type: String,
}

/// A single entry submitted when creating a Git tree.
///
/// # Examples
///
/// ```rust
/// use github_client::models::TreeEntryPayload;
///
/// let entry = TreeEntryPayload::blob("README.md", "# hello\n");
/// assert_eq!(entry.mode, "100644");
/// assert_eq!(entry.entry_type, "blob");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeEntryPayload {
    /// Path of the file within the repository
    pub path: String,

    /// File mode (`100644` for a regular file)
    pub mode: String,

    /// Entry type (`blob` for file content)
    #[serde(rename = "type")]
    pub entry_type: String,

    /// The file content, committed verbatim
    pub content: String,
}

impl TreeEntryPayload {
    /// Creates a regular-file blob entry.
    pub fn blob(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: "100644".to_string(),
            entry_type: "blob".to_string(),
            content: content.into(),
        }
    }
}

/// Response to a tree creation request. Only the SHA is consumed.
#[derive(Clone, Debug, Deserialize)]
pub struct CreatedTree {
    /// The SHA of the newly created tree
    pub sha: String,
}

/// A commit object as returned by the Git-data API.
///
/// Used to resolve the parent of a new commit. Only the fields the
/// orchestration layer needs are modeled.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CommitObject {
    /// The SHA of the commit
    pub sha: String,

    /// The commit message
    #[serde(default)]
    pub message: Option<String>,
}

/// Author identity attached to a newly created commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommitAuthor {
    /// Author name (typically the authenticated user's login)
    pub name: String,

    /// Author email
    pub email: String,

    /// Author timestamp
    pub date: DateTime<Utc>,
}

/// Committer identity for the contents API (no timestamp; GitHub assigns it).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommitIdentity {
    /// Committer name
    pub name: String,

    /// Committer email
    pub email: String,
}

/// The payload submitted to create a new commit object.
///
/// # Examples
///
/// ```rust
/// use chrono::Utc;
/// use github_client::models::{CommitAuthor, CommitPayload};
///
/// let payload = CommitPayload {
///     message: "Initial commit".to_string(),
///     tree: "tree-sha".to_string(),
///     parents: vec!["parent-sha".to_string()],
///     author: CommitAuthor {
///         name: "octocat".to_string(),
///         email: "octocat@example.com".to_string(),
///         date: Utc::now(),
///     },
/// };
///
/// assert_eq!(payload.parents.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommitPayload {
    /// The commit message
    pub message: String,

    /// The SHA of the tree the commit records
    pub tree: String,

    /// Parent commit SHAs (empty for a root commit)
    pub parents: Vec<String>,

    /// The author identity recorded on the commit
    pub author: CommitAuthor,
}

/// Response to a commit creation request. Only the SHA is consumed.
#[derive(Clone, Debug, Deserialize)]
pub struct CreatedCommit {
    /// The SHA of the newly created commit
    pub sha: String,
}

/// An issue as returned by the REST API after creation.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Issue {
    /// The issue number within the repository
    pub number: u64,

    /// The issue title
    pub title: String,

    /// User-facing URL of the issue
    pub html_url: Url,
}

/// The user the client is authenticated as.
///
/// The email is `None` (or empty) when the user has marked their email
/// address as private; callers are expected to substitute a placeholder.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthenticatedUser {
    /// The login name of the user
    pub login: String,

    /// The user's public email address, if not private
    #[serde(default)]
    pub email: Option<String>,
}
