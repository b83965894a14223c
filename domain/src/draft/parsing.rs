//! Structured writer output parsing.
//!
//! The writer model answers with `{"file_output": {...}}`. This module turns
//! that payload into a [`Draft`]. Pure logic, no I/O.

use super::entities::{Draft, DraftAction};
use crate::core::error::DomainError;
use serde::Deserialize;

/// One file as returned by the writer model.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredFileOutput {
    pub file_path: String,
    pub content: String,
    pub action: String,
    pub explanation: String,
}

/// Top-level writer payload.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredWriterResponse {
    pub file_output: StructuredFileOutput,
}

/// Parse the writer model's JSON payload into a draft for `expected_path`.
///
/// The draft keeps the task's path even if the model echoes a different
/// one; a mismatch is reported so callers can log it.
pub fn parse_writer_output(
    raw: &str,
    expected_path: &str,
) -> Result<(Draft, Option<String>), DomainError> {
    let response: StructuredWriterResponse = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| DomainError::MalformedOutput(format!("writer payload: {}", e)))?;

    let output = response.file_output;
    let mismatch = (output.file_path != expected_path).then(|| output.file_path.clone());

    let mut draft = Draft::new(expected_path, output.content)
        .with_action(DraftAction::from_label(&output.action));
    if !output.explanation.trim().is_empty() {
        draft = draft.with_explanation(output.explanation);
    }

    Ok((draft, mismatch))
}

/// Remove a surrounding Markdown code fence, if any.
///
/// Structured-output endpoints return bare JSON, but some models still wrap
/// it in ```json ... ```.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}
