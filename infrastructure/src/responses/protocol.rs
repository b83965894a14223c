//! Wire types for the Responses API.
//!
//! Only the fields this crate sends or reads are modelled; everything else
//! in the response body is ignored.

use reviewer_application::StructuredRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /responses`
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub input: String,
    pub text: TextConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextConfig {
    pub format: TextFormat,
}

/// Structured-output format
#[derive(Debug, Clone, Serialize)]
pub struct TextFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

impl From<&StructuredRequest> for ResponsesRequest {
    fn from(request: &StructuredRequest) -> Self {
        Self {
            model: request.model.to_string(),
            instructions: request.system_prompt.clone(),
            input: request.prompt.clone(),
            text: TextConfig {
                format: TextFormat {
                    kind: "json_schema",
                    name: request.schema.name.to_string(),
                    schema: request.schema.schema.clone(),
                    strict: true,
                },
            },
        }
    }
}

/// Response body (subset)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

/// Error object, both in error bodies and in failed responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<Value>,
    pub message: String,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: ApiError,
}

impl ResponsesResponse {
    /// The structured payload: `output_text`, else the first non-empty
    /// `output[].content[].text`.
    pub fn payload(&self) -> Option<&str> {
        if let Some(text) = self.output_text.as_deref()
            && !text.trim().is_empty()
        {
            return Some(text);
        }

        self.output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter_map(|content| content.text.as_deref())
            .find(|text| !text.trim().is_empty())
    }

    /// First refusal message, if the model declined
    pub fn refusal(&self) -> Option<&str> {
        self.output
            .iter()
            .flat_map(|item| item.content.iter())
            .find_map(|content| content.refusal.as_deref())
    }
}
