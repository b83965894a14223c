//! Role-based model configuration from TOML (`[models]` section)

use reviewer_domain::Model;
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// Names are OpenRouter model ids; unknown names are passed through as-is.
///
/// # Example
///
/// ```toml
/// [models]
/// writer = "anthropic/claude-opus-4.6"
/// openai_reviewer = "openai/gpt-5.2-codex"
/// gemini_reviewer = "google/gemini-3-flash-preview"
/// collator = "anthropic/claude-opus-4.6"
/// # Optional: replaces the two named reviewer routes
/// reviewers = ["openai/gpt-5.2-codex", "anthropic/claude-sonnet-4.5"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model that drafts the file
    pub writer: String,
    /// First reviewer route
    pub openai_reviewer: String,
    /// Second reviewer route
    pub gemini_reviewer: String,
    /// Model that merges the reviewers' findings
    pub collator: String,
    /// Explicit reviewer list; when non-empty it replaces the named routes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reviewers: Vec<String>,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            writer: Model::default_writer().to_string(),
            openai_reviewer: Model::Gpt52Codex.to_string(),
            gemini_reviewer: Model::Gemini3FlashPreview.to_string(),
            collator: Model::default_collator().to_string(),
            reviewers: Vec::new(),
        }
    }
}

impl FileModelsConfig {
    /// Every configured name with its field, for validation
    pub(crate) fn named_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("writer", self.writer.as_str()),
            ("openai_reviewer", self.openai_reviewer.as_str()),
            ("gemini_reviewer", self.gemini_reviewer.as_str()),
            ("collator", self.collator.as_str()),
        ]
    }

    pub fn writer_model(&self) -> Model {
        Model::from(self.writer.trim())
    }

    /// Reviewer routes in review order
    pub fn reviewer_models(&self) -> Vec<Model> {
        if !self.reviewers.is_empty() {
            return self.reviewers.iter().map(|m| Model::from(m.trim())).collect();
        }
        vec![
            Model::from(self.openai_reviewer.trim()),
            Model::from(self.gemini_reviewer.trim()),
        ]
    }

    pub fn collator_model(&self) -> Model {
        Model::from(self.collator.trim())
    }
}
