//! Domain error types

use crate::supervisor::state::SupervisorStatus;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Invalid transition from {from} on {event}")]
    InvalidTransition {
        from: SupervisorStatus,
        event: &'static str,
    },

    #[error("Malformed structured output: {0}")]
    MalformedOutput(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }

    pub(crate) fn transition(from: SupervisorStatus, event: &'static str) -> Self {
        DomainError::InvalidTransition { from, event }
    }
}
