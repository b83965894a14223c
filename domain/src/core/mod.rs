//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — LLM model identifiers
//! - [`error::DomainError`] — domain-level errors
//! - [`string::truncate`] — log-friendly string shortening

pub mod error;
pub mod model;
pub mod string;
