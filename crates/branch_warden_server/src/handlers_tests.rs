use super::*;
use crate::signature::sign;
use crate::test_support::{test_state, TEST_SECRET};
use axum::http::HeaderValue;

const CREATED_BODY: &str = r#"{
    "action": "created",
    "repository": {
        "name": "widgets",
        "default_branch": "main",
        "owner": { "login": "acme" }
    },
    "organization": { "login": "acme" }
}"#;

fn signed_headers(body: &str, event_kind: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let signature = sign(body.as_bytes(), TEST_SECRET.as_bytes());
    headers.insert(HEADER_SIGNATURE, HeaderValue::from_str(&signature).unwrap());
    headers.insert(HEADER_DELIVERY, HeaderValue::from_static("delivery-1"));
    if let Some(kind) = event_kind {
        headers.insert(HEADER_EVENT, HeaderValue::from_str(kind).unwrap());
    }
    headers
}

async fn post_webhook(body: &str, headers: HeaderMap) -> StatusCode {
    let response = receive_webhook(
        State(test_state()),
        headers,
        Bytes::from(body.to_string()),
    )
    .await;
    response.status()
}

#[tokio::test]
async fn test_health_check_is_ok() {
    let response = health_check().await.into_response();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unsigned_delivery_is_unauthorized() {
    let status = post_webhook(CREATED_BODY, HeaderMap::new()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_body_is_unauthorized() {
    let headers = signed_headers(CREATED_BODY, Some("repository"));

    let status = post_webhook(r#"{"action":"deleted"}"#, headers).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_event_kind_is_bad_request() {
    let headers = signed_headers(CREATED_BODY, None);

    let status = post_webhook(CREATED_BODY, headers).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ping_is_acknowledged() {
    let body = r#"{"zen":"Design for failure."}"#;
    let headers = signed_headers(body, Some("ping"));

    let status = post_webhook(body, headers).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_created_repository_is_processed() {
    let headers = signed_headers(CREATED_BODY, Some("repository"));

    let status = post_webhook(CREATED_BODY, headers).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_other_repository_actions_are_ignored() {
    let body = r#"{
        "action": "deleted",
        "repository": {
            "name": "widgets",
            "default_branch": "main",
            "owner": { "login": "acme" }
        }
    }"#;
    let headers = signed_headers(body, Some("repository"));

    let status = post_webhook(body, headers).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_malformed_payload_is_bad_request() {
    let body = "not json at all";
    let headers = signed_headers(body, Some("repository"));

    let status = post_webhook(body, headers).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_event_kind_is_acknowledged() {
    let body = r#"{"action":"created"}"#;
    let headers = signed_headers(body, Some("issue_comment"));

    let status = post_webhook(body, headers).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}
