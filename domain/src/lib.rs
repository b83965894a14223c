//! Domain layer for code-reviewer
//!
//! This crate contains the core entities, value objects and the supervisor
//! state machine. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! - **Task**: an immutable request to create or modify one file
//! - **Draft**: the writer's candidate content for an iteration
//! - **Violation report**: the reviewer's findings; *compliant* when it
//!   holds no error-severity violation
//! - **Supervisor**: a bounded state machine that routes a task between
//!   writer and reviewer until compliance or exhaustion

pub mod core;
pub mod draft;
pub mod prompt;
pub mod review;
pub mod supervisor;
pub mod task;

// Re-export commonly used types
pub use crate::core::{error::DomainError, model::Model};
pub use draft::{Draft, DraftAction, parse_writer_output};
pub use prompt::{OutputSchema, ReviewerPromptTemplate, WriterPromptTemplate};
pub use review::{
    ModelReviewResult, ReviewIssue, Severity, Violation, ViolationReport,
    build_consolidated_report, parse_review_issues,
};
pub use supervisor::{
    FinalDraft, ReviewVerdict, Route, SupervisorOutcome, SupervisorState, SupervisorStatus,
};
pub use task::{ContextFile, TaskRequest};
