//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters and test fakes
//! must implement.

pub mod conversation_logger;
pub mod draft_reviewer;
pub mod draft_writer;
pub mod llm_gateway;
pub mod progress;
