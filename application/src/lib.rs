//! Application layer for code-reviewer
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SupervisorParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    draft_reviewer::{DraftReviewer, ReviewError},
    draft_writer::{DraftWriter, GenerationError},
    llm_gateway::{GatewayError, LlmGateway, StructuredRequest},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::review_draft::MultiModelReviewer;
pub use use_cases::supervise::{
    SuperviseInput, SuperviseTaskUseCase, SupervisorError, final_status,
};
pub use use_cases::write_draft::LlmDraftWriter;
