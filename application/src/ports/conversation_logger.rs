//! Port for structured run logging.
//!
//! Defines the [`ConversationLogger`] trait for recording supervisor events
//! (task submission, drafts, reviews, terminal status) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures a machine-readable
//! transcript of every run (JSONL in the infrastructure adapter).

use serde_json::Value;

/// A structured run event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "draft_generated", "review_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging run events to a structured log.
///
/// `log` is synchronous and infallible: a broken log sink must never
/// change the outcome of a task, so implementations swallow their own
/// write errors.
pub trait ConversationLogger: Send + Sync {
    /// Record an event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
