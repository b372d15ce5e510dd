//! Tests for the workflow configuration.

use super::*;

#[test]
fn test_new_applies_documented_defaults() {
    let config = WardenConfig::new("acme");

    assert_eq!(config.organization, "acme");
    assert_eq!(config.required_reviews, DEFAULT_REQUIRED_REVIEWS);
    assert_eq!(config.reviewer_mention, DEFAULT_REVIEWER_MENTION);
    assert_eq!(config.fallback_committer_email, DEFAULT_FALLBACK_EMAIL);
}

#[test]
fn test_with_required_reviews_accepts_positive_count() {
    let config = WardenConfig::new("acme").with_required_reviews(2);
    assert_eq!(config.required_reviews, 2);
}

#[test]
fn test_with_required_reviews_rejects_zero() {
    let config = WardenConfig::new("acme").with_required_reviews(0);
    assert_eq!(config.required_reviews, DEFAULT_REQUIRED_REVIEWS);
}

#[test]
fn test_parse_required_reviews_missing_value_falls_back() {
    assert_eq!(
        WardenConfig::parse_required_reviews(None),
        DEFAULT_REQUIRED_REVIEWS
    );
    assert_eq!(
        WardenConfig::parse_required_reviews(Some("")),
        DEFAULT_REQUIRED_REVIEWS
    );
}

#[test]
fn test_parse_required_reviews_unparsable_value_falls_back() {
    assert_eq!(
        WardenConfig::parse_required_reviews(Some("abc")),
        DEFAULT_REQUIRED_REVIEWS
    );
    assert_eq!(
        WardenConfig::parse_required_reviews(Some("-1")),
        DEFAULT_REQUIRED_REVIEWS
    );
}

#[test]
fn test_parse_required_reviews_zero_falls_back() {
    assert_eq!(
        WardenConfig::parse_required_reviews(Some("0")),
        DEFAULT_REQUIRED_REVIEWS
    );
}

#[test]
fn test_parse_required_reviews_valid_value() {
    assert_eq!(WardenConfig::parse_required_reviews(Some("2")), 2);
    assert_eq!(WardenConfig::parse_required_reviews(Some(" 4 ")), 4);
}

#[test]
fn test_protection_policy_reflects_review_count() {
    let config = WardenConfig::new("acme").with_required_reviews(2);
    let policy = config.protection_policy();

    assert_eq!(
        policy
            .required_pull_request_reviews
            .required_approving_review_count,
        2
    );
    assert!(policy.required_pull_request_reviews.require_code_owner_reviews);
    assert!(!policy.required_pull_request_reviews.dismiss_stale_reviews);
    assert_eq!(policy.allow_force_pushes, Some(false));
    assert!(policy.required_status_checks.is_none());
    assert!(policy.restrictions.is_none());
}

#[test]
fn test_readme_body_names_the_repository() {
    let body = readme_body("empty");

    assert!(body.starts_with("# empty\n"));
    assert!(body.contains("loves documentation"));
    assert!(body.ends_with('\n'));
}
