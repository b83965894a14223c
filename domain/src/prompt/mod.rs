//! Prompt templates and structured-output schemas for the model roles.

pub mod schema;
pub mod template;

pub use schema::OutputSchema;
pub use template::{NO_FEEDBACK, ReviewerPromptTemplate, WriterPromptTemplate};
