//! LLM-backed writer capability.
//!
//! [`LlmDraftWriter`] renders the writer prompt, asks one model for a
//! structured `file_output` payload and turns it into a [`Draft`].

use crate::ports::draft_writer::{DraftWriter, GenerationError};
use crate::ports::llm_gateway::{LlmGateway, StructuredRequest};
use async_trait::async_trait;
use reviewer_domain::{
    Draft, Model, OutputSchema, TaskRequest, ViolationReport, WriterPromptTemplate,
    parse_writer_output,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Writer that delegates drafting to a single model.
pub struct LlmDraftWriter {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
    rules_text: String,
}

impl LlmDraftWriter {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model, rules_text: impl Into<String>) -> Self {
        Self {
            gateway,
            model,
            rules_text: rules_text.into(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

#[async_trait]
impl DraftWriter for LlmDraftWriter {
    async fn generate(
        &self,
        request: &TaskRequest,
        feedback: Option<&ViolationReport>,
    ) -> Result<Draft, GenerationError> {
        let prompt = WriterPromptTemplate::write_file(request, &self.rules_text, feedback);
        let structured = StructuredRequest::new(self.model.clone(), prompt, OutputSchema::writer());

        info!("Requesting draft of {} from {}", request.path(), self.model);
        let raw = self.gateway.respond(&structured).await?;
        debug!("Writer payload: {} bytes", raw.len());

        let (draft, mismatch) = parse_writer_output(&raw, request.path())
            .map_err(|e| GenerationError::MalformedOutput(e.to_string()))?;

        if let Some(returned) = mismatch {
            warn!(
                "Writer returned path {} for task {}; keeping the task path",
                returned,
                request.path()
            );
        }

        Ok(draft)
    }
}
