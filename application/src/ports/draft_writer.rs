//! Writer capability port.
//!
//! [`DraftWriter`] produces a complete draft of the task's target file,
//! optionally guided by the previous review. The supervisor never retries a
//! failed call; any [`GenerationError`] ends the task.

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use reviewer_domain::{Draft, TaskRequest, ViolationReport};
use std::time::Duration;
use thiserror::Error;

/// Writer capability failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Malformed writer output: {0}")]
    MalformedOutput(String),

    #[error("Writer timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("{0}")]
    Other(String),
}

/// Port for the writer capability.
#[async_trait]
pub trait DraftWriter: Send + Sync {
    /// Generate a draft for `request`.
    ///
    /// `feedback` is the report from the immediately preceding review, or
    /// `None` on the first pass.
    async fn generate(
        &self,
        request: &TaskRequest,
        feedback: Option<&ViolationReport>,
    ) -> Result<Draft, GenerationError>;
}
