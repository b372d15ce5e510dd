//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. It provides comprehensive error context for debugging
//! and error handling in applications using this client.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// This enum represents all possible error conditions when working with the GitHub API,
/// including authentication failures, API errors, rate limiting, and data processing issues.
///
/// The `NotFound` variant is significant for callers: a missing Git reference is an
/// expected state for repositories created without an initial commit, and callers
/// branch on it rather than treating it as a hard failure.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.get_ref("my-org", "my-repo", "heads/main").await {
///     Ok(sha) => println!("Branch tip: {}", sha),
///     Err(Error::NotFound) => println!("Branch has no commits yet"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic API request failure.
    ///
    /// This error occurs when a GitHub API request fails for unspecified reasons.
    /// Check the GitHub API status and ensure your request parameters are correct.
    #[error("API request failed")]
    ApiError(),

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - The personal access token is invalid or expired
    /// - Network connectivity issues prevent authentication
    /// - The token lacks necessary scopes
    ///
    /// The contained string provides specific details about the authentication failure.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    ///
    /// This error occurs when the GitHub API returns a response that cannot be
    /// parsed into the expected data structure. This may indicate:
    /// - API version changes
    /// - Unexpected response format
    /// - Corrupted response data
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GitHub API returned a response in an unexpected format.
    ///
    /// This error indicates that the API response structure doesn't match
    /// what the client expects, or that the call failed for a reason the
    /// client does not classify more specifically.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code,
    /// indicating that the requested resource (repository, reference, commit, etc.)
    /// does not exist or is not accessible with the current authentication.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    ///
    /// This error occurs when the client has made too many requests in a given
    /// time window. Check the `X-RateLimit-Reset` header in the response to
    /// determine when to retry.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
