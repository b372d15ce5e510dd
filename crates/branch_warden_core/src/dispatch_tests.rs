use super::*;
use crate::config::WardenConfig;
use crate::events::RepositoryCreatedEvent;
use async_trait::async_trait;
use github_client::models::{AuthenticatedUser, CommitObject, CommitPayload, Issue, TreeEntryPayload};
use github_client::{BranchProtectionRequest, CreateFilePayload, Error as ClientError, RepositoryClient};
use std::sync::Arc;

/// Gateway stub for which every operation succeeds.
struct HappyClient;

#[async_trait]
impl RepositoryClient for HappyClient {
    async fn get_ref(&self, _: &str, _: &str, _: &str) -> Result<String, ClientError> {
        Ok("abc123".to_string())
    }

    async fn create_tree(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: &[TreeEntryPayload],
    ) -> Result<String, ClientError> {
        Ok("tree456".to_string())
    }

    async fn get_commit(&self, _: &str, _: &str, sha: &str) -> Result<CommitObject, ClientError> {
        Ok(CommitObject {
            sha: sha.to_string(),
            message: None,
        })
    }

    async fn create_commit(&self, _: &str, _: &str, _: &CommitPayload) -> Result<String, ClientError> {
        Ok("def789".to_string())
    }

    async fn update_ref(&self, _: &str, _: &str, _: &str, _: &str, _: bool) -> Result<(), ClientError> {
        Ok(())
    }

    async fn create_file(&self, _: &str, _: &str, _: &CreateFilePayload) -> Result<(), ClientError> {
        Ok(())
    }

    async fn update_branch_protection(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: &BranchProtectionRequest,
    ) -> Result<(), ClientError> {
        Ok(())
    }

    async fn create_issue(&self, _: &str, _: &str, title: &str, _: &str) -> Result<Issue, ClientError> {
        Ok(Issue {
            number: 1,
            title: title.to_string(),
            html_url: "https://github.com/acme/widgets/issues/1".parse().unwrap(),
        })
    }

    async fn get_authenticated_user(&self) -> Result<AuthenticatedUser, ClientError> {
        Ok(AuthenticatedUser {
            login: "warden-bot".to_string(),
            email: Some("bot@acme.example".to_string()),
        })
    }
}

fn dispatcher() -> EventDispatcher {
    let workflow = ProtectionWorkflow::new(Arc::new(HappyClient), WardenConfig::new("acme"));
    EventDispatcher::new(workflow)
}

#[tokio::test]
async fn test_repository_created_event_runs_the_workflow() {
    let event = Event::RepositoryCreated(RepositoryCreatedEvent {
        organization: "acme".to_string(),
        repository: "widgets".to_string(),
        default_branch: "main".to_string(),
        delivery_id: "delivery-1".to_string(),
    });

    let outcome = dispatcher().dispatch("delivery-1", event).await.unwrap();

    assert_eq!(outcome, WorkflowOutcome::Protected);
}

#[tokio::test]
async fn test_unsupported_event_is_rejected_with_its_kind() {
    let event = Event::Unsupported {
        event_kind: "issue_comment".to_string(),
    };

    let err = dispatcher().dispatch("delivery-2", event).await.unwrap_err();

    let Error::UnhandledEvent { event_kind } = err;
    assert_eq!(event_kind, "issue_comment");
}
