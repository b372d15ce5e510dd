//! Tests for the core error types.

use super::*;

#[test]
fn test_unhandled_event_display_names_kind() {
    let err = Error::UnhandledEvent {
        event_kind: "workflow_run".to_string(),
    };
    assert!(err.to_string().contains("workflow_run"));
}

#[test]
fn test_report_error_display_names_repository_and_title() {
    let err = ReportError::IssueCreation {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        title: "New Repository Protection Applied Successfully".to_string(),
        source: github_client::Error::InvalidResponse,
    };

    let rendered = err.to_string();
    assert!(rendered.contains("acme/widgets"));
    assert!(rendered.contains("New Repository Protection Applied Successfully"));
}

#[test]
fn test_report_error_exposes_source() {
    use std::error::Error as _;

    let err = ReportError::IssueCreation {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        title: "title".to_string(),
        source: github_client::Error::InvalidResponse,
    };

    assert!(err.source().is_some());
}
