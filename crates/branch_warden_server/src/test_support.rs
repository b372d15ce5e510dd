//! Shared fixtures for handler and route tests.

use std::sync::Arc;

use async_trait::async_trait;
use branch_warden_core::{EventDispatcher, ProtectionWorkflow, WardenConfig};
use github_client::models::{
    AuthenticatedUser, CommitObject, CommitPayload, Issue, TreeEntryPayload,
};
use github_client::{BranchProtectionRequest, CreateFilePayload, Error as ClientError, RepositoryClient};

use crate::AppState;

/// Webhook secret used by all fixtures.
pub const TEST_SECRET: &str = "test-webhook-secret";

/// Gateway stub for which every operation succeeds.
struct StubClient;

#[async_trait]
impl RepositoryClient for StubClient {
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

/// Builds an application state over the stub gateway.
pub fn test_state() -> AppState {
    let workflow = ProtectionWorkflow::new(Arc::new(StubClient), WardenConfig::new("acme"));
    AppState {
        dispatcher: Arc::new(EventDispatcher::new(workflow)),
        webhook_secret: Arc::new(TEST_SECRET.as_bytes().to_vec()),
        organization: "acme".to_string(),
    }
}
