//! Event types consumed by the workflow.
//!
//! The webhook layer verifies signatures and decodes payloads; by the time
//! an event reaches this crate it is trusted data.

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;

/// A verified "repository created" event.
///
/// Immutable for the lifetime of one workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCreatedEvent {
    /// The organization (or owner) the repository was created in
    pub organization: String,

    /// The name of the new repository
    pub repository: String,

    /// The repository's default branch name (e.g. `main`)
    pub default_branch: String,

    /// The webhook delivery identifier, carried through for log correlation
    pub delivery_id: String,
}

/// A typed event as produced by the webhook layer.
///
/// One variant per supported event kind; kinds the dispatcher has no handler
/// for arrive as [`Event::Unsupported`] so their failure to dispatch is
/// observed in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A repository was created in the governed organization
    RepositoryCreated(RepositoryCreatedEvent),

    /// An event kind no handler is registered for
    Unsupported {
        /// The `X-GitHub-Event` value as delivered
        event_kind: String,
    },
}

impl Event {
    /// Returns the event kind string used in logs and dispatch decisions.
    pub fn kind(&self) -> &str {
        match self {
            Self::RepositoryCreated(_) => "repository",
            Self::Unsupported { event_kind } => event_kind,
        }
    }
}
