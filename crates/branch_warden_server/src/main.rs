//! Branch Warden webhook server.
//!
//! Listens for GitHub `repository` webhook deliveries and runs the
//! bootstrap-and-protect workflow for every newly created repository.
//!
//! # Environment Variables
//!
//! See [`settings`] for the full list. `RUST_LOG` controls the log level
//! (default: info).

use std::env;
use std::sync::Arc;

use branch_warden_core::{EventDispatcher, ProtectionWorkflow};
use github_client::{create_token_client, GitHubClient, RepositoryClient};
use secrecy::ExposeSecret;

mod handlers;
mod models;
mod routes;
mod server;
mod settings;
mod signature;

#[cfg(test)]
mod test_support;

use server::{ServerConfig, WebhookServer};
use settings::Settings;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Routes verified events to the workflow
    pub dispatcher: Arc<EventDispatcher>,

    /// Shared secret for delivery signature verification
    pub webhook_secret: Arc<Vec<u8>>,

    /// Organization used when a payload carries none
    pub organization: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let settings = Settings::from_env()?;

    let octocrab = create_token_client(settings.github_token.expose_secret())?;

    // Best effort; startup proceeds even when the probe fails.
    match octocrab.ratelimit().get().await {
        Ok(limits) => tracing::info!(
            remaining = limits.rate.remaining,
            limit = limits.rate.limit,
            "GitHub API rate limit"
        ),
        Err(e) => tracing::warn!(error = %e, "Could not read the rate limit"),
    }

    let client = Arc::new(GitHubClient::new(octocrab));
    match client.get_authenticated_user().await {
        Ok(user) => tracing::info!(login = user.login, "Authenticated with GitHub"),
        Err(e) => tracing::warn!(error = %e, "Could not resolve the authenticated user"),
    }

    let workflow = ProtectionWorkflow::new(client, settings.warden_config());
    let state = AppState {
        dispatcher: Arc::new(EventDispatcher::new(workflow)),
        webhook_secret: Arc::new(settings.webhook_secret.expose_secret().as_bytes().to_vec()),
        organization: settings.organization.clone(),
    };

    let config = ServerConfig {
        host: settings.host.clone(),
        port: settings.port,
    };

    tracing::info!(
        org = settings.organization,
        required_reviews = settings.required_reviews,
        "Starting Branch Warden"
    );

    WebhookServer::new(config, state).serve().await
}
