//! JSON schemas for structured model output.
//!
//! Passed to the Responses API as `text.format` so the model is constrained
//! to the payloads the parsers in [`crate::draft::parsing`] and
//! [`crate::review::parsing`] expect.

use serde_json::{Value, json};

/// Named schema handed to a structured-output request
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: &'static str,
    pub schema: Value,
}

impl OutputSchema {
    /// `{"file_output": {file_path, content, action, explanation}}`
    pub fn writer() -> Self {
        Self {
            name: "structured_writer_response",
            schema: json!({
                "type": "object",
                "additionalProperties": false,
                "required": ["file_output"],
                "properties": {
                    "file_output": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["file_path", "content", "action", "explanation"],
                        "properties": {
                            "file_path": {"type": "string", "minLength": 1},
                            "content": {"type": "string"},
                            "action": {"type": "string", "enum": ["create", "modify"]},
                            "explanation": {"type": "string"}
                        }
                    }
                }
            }),
        }
    }

    /// `{"issues": [{file_path, issue, violation, suggested_fix, severity}]}`
    pub fn issues() -> Self {
        Self {
            name: "structured_issues_response",
            schema: json!({
                "type": "object",
                "additionalProperties": false,
                "required": ["issues"],
                "properties": {
                    "issues": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "additionalProperties": false,
                            "required": ["file_path", "issue", "violation", "suggested_fix", "severity"],
                            "properties": {
                                "file_path": {"type": "string", "minLength": 1},
                                "issue": {"type": "string", "minLength": 1},
                                "violation": {"type": "string", "minLength": 1},
                                "suggested_fix": {"type": "string", "minLength": 1},
                                "severity": {"type": "string", "enum": ["error", "warning"]}
                            }
                        }
                    }
                }
            }),
        }
    }
}
