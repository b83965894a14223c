//! LLM Gateway port
//!
//! Defines the interface for structured-output calls to an LLM provider.

use async_trait::async_trait;
use reviewer_domain::{Model, OutputSchema};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model returned no structured payload")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A single structured-output request
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub model: Model,
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub schema: OutputSchema,
}

impl StructuredRequest {
    pub fn new(model: Model, prompt: impl Into<String>, schema: OutputSchema) -> Self {
        Self {
            model,
            system_prompt: None,
            prompt: prompt.into(),
            schema,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to an LLM provider.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one prompt and return the raw structured payload (JSON text)
    async fn respond(&self, request: &StructuredRequest) -> Result<String, GatewayError>;
}
