//! Typed event dispatch.
//!
//! This module provides the [`EventDispatcher`] component: the seam between
//! the webhook layer and the workflow. Each supported event kind maps to
//! exactly one handler; everything else lands in the unhandled-event sink,
//! which guarantees that every event-processing failure is logged at least
//! once with its delivery identifier, even when a handler has already logged
//! its own failure.

use tracing::{error, warn};

use crate::errors::Error;
use crate::events::Event;
use crate::workflow::{ProtectionWorkflow, WorkflowOutcome};

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

/// Routes verified events to their handler.
pub struct EventDispatcher {
    /// Handler for repository creation events
    workflow: ProtectionWorkflow,
}

impl EventDispatcher {
    /// Creates a dispatcher over the given workflow.
    pub fn new(workflow: ProtectionWorkflow) -> Self {
        Self { workflow }
    }

    /// Dispatches one delivery to its handler.
    ///
    /// Workflow failures are reported in the returned [`WorkflowOutcome`],
    /// not as errors; a failed run is still a completed dispatch.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnhandledEvent` when no handler exists for the
    /// delivered event kind. The error is logged here before it is returned,
    /// so callers may drop it.
    pub async fn dispatch(
        &self,
        delivery_id: &str,
        event: Event,
    ) -> Result<WorkflowOutcome, Error> {
        let event_kind = event.kind().to_string();
        match event {
            Event::RepositoryCreated(ev) => {
                let outcome = self.workflow.run(&ev).await;
                if !outcome.is_success() {
                    // Possibly a duplicate of the workflow's own log entry;
                    // a duplicate beats a silent drop.
                    warn!(
                        delivery_id = delivery_id,
                        event_kind = event_kind,
                        outcome = ?outcome,
                        "Event processing did not reach a protected state"
                    );
                }
                Ok(outcome)
            }
            Event::Unsupported { event_kind } => {
                let err = Error::UnhandledEvent { event_kind };
                Self::observe_failure(delivery_id, &err);
                Err(err)
            }
        }
    }

    /// The sink: the single place every unconsumed dispatch error is logged.
    fn observe_failure(delivery_id: &str, error: &Error) {
        let Error::UnhandledEvent { event_kind } = error;
        error!(
            delivery_id = delivery_id,
            event_kind = event_kind,
            "Event was not consumed by any handler"
        );
    }
}
