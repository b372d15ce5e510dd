//! HTTP routing configuration.
//!
//! - POST /webhook - Receive GitHub webhook deliveries
//! - GET  /health  - Health check

use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{handlers, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Creates the router with all routes, request tracing, and timeouts.
pub fn create_router(state: AppState) -> Router {
    // Long enough for the full bootstrap-and-protect sequence against the
    // GitHub API.
    let timeout_layer = TimeoutLayer::new(Duration::from_secs(30));

    Router::new()
        .route("/webhook", post(handlers::receive_webhook))
        .route("/health", get(handlers::health_check))
        .layer(timeout_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
