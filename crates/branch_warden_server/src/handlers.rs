//! HTTP request handlers.
//!
//! The webhook handler owns the untrusted edge: it verifies the delivery
//! signature, decodes the payload, and hands a typed event to the
//! dispatcher. Once a delivery is authentic, processing failures are logged
//! and acknowledged with 204 rather than surfaced as 5xx; GitHub's
//! redelivery storms are worse than a logged failure.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use branch_warden_core::{Event, RepositoryCreatedEvent};
use serde_json::json;
use tracing::{info, warn};

use crate::models::RepositoryEventPayload;
use crate::signature::verify_signature;
use crate::AppState;

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// Signature header GitHub attaches to every delivery.
pub const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Event-kind header.
pub const HEADER_EVENT: &str = "x-github-event";

/// Delivery identifier header.
pub const HEADER_DELIVERY: &str = "x-github-delivery";

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Receives one webhook delivery.
///
/// Responses:
/// - 401 when the signature is missing or does not match the body
/// - 400 when the event-kind header is missing or the payload is not valid JSON
/// - 204 otherwise, including for processing failures (which are logged)
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(HEADER_SIGNATURE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !verify_signature(&body, signature, &state.webhook_secret) {
        warn!("Rejected delivery with invalid signature");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let delivery_id = headers
        .get(HEADER_DELIVERY)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let Some(event_kind) = headers.get(HEADER_EVENT).and_then(|v| v.to_str().ok()) else {
        warn!(delivery_id = delivery_id, "Delivery without an event kind");
        return StatusCode::BAD_REQUEST.into_response();
    };

    match event_kind {
        "ping" => {
            info!(delivery_id = delivery_id, "Webhook ping received");
            StatusCode::NO_CONTENT.into_response()
        }
        "repository" => {
            let payload: RepositoryEventPayload = match serde_json::from_slice(&body) {
                Ok(p) => p,
                Err(e) => {
                    warn!(
                        delivery_id = delivery_id,
                        error = %e,
                        "Failed to decode repository event payload"
                    );
                    return StatusCode::BAD_REQUEST.into_response();
                }
            };

            if payload.action != "created" {
                info!(
                    delivery_id = delivery_id,
                    action = payload.action,
                    repo = payload.repository.name,
                    "Ignoring repository action"
                );
                return StatusCode::NO_CONTENT.into_response();
            }

            let event = Event::RepositoryCreated(RepositoryCreatedEvent {
                organization: payload.organization_login(&state.organization),
                repository: payload.repository.name,
                default_branch: payload.repository.default_branch,
                delivery_id: delivery_id.clone(),
            });

            // Failures are already logged by the dispatcher and workflow.
            let _ = state.dispatcher.dispatch(&delivery_id, event).await;
            StatusCode::NO_CONTENT.into_response()
        }
        other => {
            let event = Event::Unsupported {
                event_kind: other.to_string(),
            };
            // Logged by the dispatcher's sink.
            let _ = state.dispatcher.dispatch(&delivery_id, event).await;
            StatusCode::NO_CONTENT.into_response()
        }
    }
}
