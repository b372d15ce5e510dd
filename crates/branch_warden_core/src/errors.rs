//! Error types for the branch warden core.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors surfaced by event dispatch.
///
/// Workflow step failures are not errors at this level; they are encoded in
/// [`crate::WorkflowOutcome`] because a failed run is still a completed
/// dispatch.
#[derive(Error, Debug)]
pub enum Error {
    /// No handler is registered for the delivered event kind.
    #[error("No handler registered for event kind '{event_kind}'")]
    UnhandledEvent {
        /// The event kind as delivered by the webhook layer
        event_kind: String,
    },
}

/// Failure to create an issue through the reporter.
///
/// Reporting is best-effort: these errors are logged by the reporter and
/// never retried or escalated.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The issue creation call failed.
    #[error("Failed to create issue '{title}' on {owner}/{repo}")]
    IssueCreation {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// The issue title that failed to post
        title: String,
        /// The underlying client failure
        #[source]
        source: github_client::Error,
    },
}
