//! Reviewer capability port.
//!
//! [`DraftReviewer`] checks one draft against the coding rules and returns
//! a [`ViolationReport`]. Like the writer, a failed call is fatal for the
//! task.

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use reviewer_domain::{Draft, ViolationReport};
use std::time::Duration;
use thiserror::Error;

/// Reviewer capability failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("No reviewer models configured")]
    NoReviewers,

    #[error("Reviewer {model} failed: {source}")]
    ModelFailed {
        model: String,
        #[source]
        source: GatewayError,
    },

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Malformed review output: {0}")]
    MalformedOutput(String),

    #[error("Reviewer timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("{0}")]
    Other(String),
}

/// Port for the reviewer capability.
#[async_trait]
pub trait DraftReviewer: Send + Sync {
    /// Review `draft` and report every rule violation found.
    async fn review(&self, draft: &Draft) -> Result<ViolationReport, ReviewError>;
}
