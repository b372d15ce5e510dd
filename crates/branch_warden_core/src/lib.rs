//! # Branch Warden Core
//!
//! This crate provides the core orchestration logic for Branch Warden, a
//! governance tool that brings the default branch of every newly created
//! organization repository into a documented, protected state and records
//! the outcome as an audit issue on the repository.
//!
//! ## Overview
//!
//! One "repository created" webhook delivery triggers exactly one run of the
//! protection workflow:
//!
//! 1. Resolve the default branch reference
//! 2. Initialize the branch (absent) or commit a README update (present)
//! 3. Apply branch protection
//! 4. Record an audit issue (best effort)
//!
//! When branch initialization fails the workflow posts a diagnostic issue
//! instead of silently aborting; when protection fails no issue is created
//! at all, so an issue on a repository always means protection succeeded.
//!
//! ## Architecture
//!
//! The crate follows a dependency injection pattern for testability:
//! - [`github_client::RepositoryClient`] trait for all remote operations
//! - [`WardenConfig`] constructed once at startup, never ambient globals
//! - [`EventDispatcher`] as the typed seam to the webhook layer
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use branch_warden_core::{
//!     Event, EventDispatcher, ProtectionWorkflow, RepositoryCreatedEvent, WardenConfig,
//! };
//! use github_client::{create_token_client, GitHubClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let octocrab = create_token_client("ghp_token")?;
//! let client = Arc::new(GitHubClient::new(octocrab));
//! let config = WardenConfig::new("acme").with_required_reviews(2);
//! let dispatcher = EventDispatcher::new(ProtectionWorkflow::new(client, config));
//!
//! let event = Event::RepositoryCreated(RepositoryCreatedEvent {
//!     organization: "acme".to_string(),
//!     repository: "widgets".to_string(),
//!     default_branch: "main".to_string(),
//!     delivery_id: "delivery-1".to_string(),
//! });
//! let outcome = dispatcher.dispatch("delivery-1", event).await?;
//! println!("Outcome: {:?}", outcome);
//! # Ok(())
//! # }
//! ```

/// Workflow configuration
pub mod config;

/// Typed event dispatch and the unhandled-event sink
pub mod dispatch;

/// Error types
pub mod errors;

/// Event types consumed by the workflow
pub mod events;

/// Best-effort issue reporting
pub mod reporter;

/// The bootstrap-and-protect workflow
pub mod workflow;

// Re-export commonly used types
pub use config::{WardenConfig, DEFAULT_REQUIRED_REVIEWS};
pub use dispatch::EventDispatcher;
pub use errors::{Error, ReportError};
pub use events::{Event, RepositoryCreatedEvent};
pub use reporter::IssueReporter;
pub use workflow::{
    ProtectionWorkflow, WorkflowOutcome, WorkflowStep, AUDIT_ISSUE_TITLE, DIAGNOSTIC_ISSUE_TITLE,
};
