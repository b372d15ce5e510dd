use super::*;
use async_trait::async_trait;
use github_client::models::{AuthenticatedUser, CommitObject, CommitPayload, Issue, TreeEntryPayload};
use github_client::{BranchProtectionRequest, CreateFilePayload, Error as ClientError};
use std::sync::Mutex;

/// Issue-only mock; every other gateway call is unreachable from the reporter.
struct IssueMock {
    fail: bool,
    created: Mutex<Vec<(String, String, String, String)>>,
}

impl IssueMock {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            created: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RepositoryClient for IssueMock {
    async fn get_ref(&self, _: &str, _: &str, _: &str) -> Result<String, ClientError> {
        unreachable!()
    }

    async fn create_tree(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: &[TreeEntryPayload],
    ) -> Result<String, ClientError> {
        unreachable!()
    }

    async fn get_commit(&self, _: &str, _: &str, _: &str) -> Result<CommitObject, ClientError> {
        unreachable!()
    }

    async fn create_commit(&self, _: &str, _: &str, _: &CommitPayload) -> Result<String, ClientError> {
        unreachable!()
    }

    async fn update_ref(&self, _: &str, _: &str, _: &str, _: &str, _: bool) -> Result<(), ClientError> {
        unreachable!()
    }

    async fn create_file(&self, _: &str, _: &str, _: &CreateFilePayload) -> Result<(), ClientError> {
        unreachable!()
    }

    async fn update_branch_protection(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: &BranchProtectionRequest,
    ) -> Result<(), ClientError> {
        unreachable!()
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> Result<Issue, ClientError> {
        if self.fail {
            return Err(ClientError::InvalidResponse);
        }
        let mut created = self.created.lock().unwrap();
        created.push((
            owner.to_string(),
            repo.to_string(),
            title.to_string(),
            body.to_string(),
        ));
        Ok(Issue {
            number: 42,
            title: title.to_string(),
            html_url: "https://github.com/acme/widgets/issues/42".parse().unwrap(),
        })
    }

    async fn get_authenticated_user(&self) -> Result<AuthenticatedUser, ClientError> {
        unreachable!()
    }
}

#[tokio::test]
async fn test_report_returns_issue_number() {
    let mock = Arc::new(IssueMock::new(false));
    let reporter = IssueReporter::new(mock.clone());

    let number = reporter
        .report("acme", "widgets", "Audit", "All good")
        .await
        .unwrap();

    assert_eq!(number, 42);
    let created = mock.created.lock().unwrap().clone();
    assert_eq!(
        created,
        vec![(
            "acme".to_string(),
            "widgets".to_string(),
            "Audit".to_string(),
            "All good".to_string(),
        )]
    );
}

#[tokio::test]
async fn test_report_failure_carries_context() {
    let mock = Arc::new(IssueMock::new(true));
    let reporter = IssueReporter::new(mock);

    let err = reporter
        .report("acme", "widgets", "Audit", "All good")
        .await
        .unwrap_err();

    let ReportError::IssueCreation {
        owner, repo, title, ..
    } = err;
    assert_eq!(owner, "acme");
    assert_eq!(repo, "widgets");
    assert_eq!(title, "Audit");
}
