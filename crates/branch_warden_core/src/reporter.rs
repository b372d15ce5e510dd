//! Compensating and audit issue reporting.
//!
//! This module provides the [`IssueReporter`] component: a thin, best-effort
//! wrapper around issue creation. The workflow routes both its audit records
//! and its diagnostic (compensating) issues through it.

use std::sync::Arc;

use github_client::RepositoryClient;
use tracing::{info, warn};

use crate::errors::ReportError;

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;

/// Creates issues on repositories as a record of workflow outcomes.
///
/// Reporting is attempted at most once per failure branch that defines it;
/// failures to report are logged and never retried or escalated.
pub struct IssueReporter {
    /// Gateway for issue creation
    client: Arc<dyn RepositoryClient>,
}

impl IssueReporter {
    /// Creates a new reporter over the given gateway.
    pub fn new(client: Arc<dyn RepositoryClient>) -> Self {
        Self { client }
    }

    /// Creates one issue, returning its number.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::IssueCreation` when the gateway call fails. The
    /// failure is logged here; callers are expected to carry on.
    pub async fn report(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> Result<u64, ReportError> {
        match self.client.create_issue(owner, repo, title, body).await {
            Ok(issue) => {
                info!(
                    owner = owner,
                    repo = repo,
                    issue_number = issue.number,
                    title = title,
                    "Created issue"
                );
                Ok(issue.number)
            }
            Err(e) => {
                warn!(
                    owner = owner,
                    repo = repo,
                    title = title,
                    error = %e,
                    "Failed to create issue; not retrying"
                );
                Err(ReportError::IssueCreation {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    title: title.to_string(),
                    source: e,
                })
            }
        }
    }
}
