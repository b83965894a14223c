//! Model value object representing an LLM model routed through an
//! OpenAI-compatible endpoint

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// LLM model identifiers (Value Object)
///
/// Identifiers use the `provider/model` form understood by OpenRouter.
/// Anything not listed here is carried verbatim as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // OpenAI models
    Gpt52Codex,
    Gpt52,
    Gpt41Mini,
    // Google models
    Gemini3FlashPreview,
    Gemini3ProPreview,
    // Anthropic models
    ClaudeOpus46,
    ClaudeSonnet45,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt52Codex => "openai/gpt-5.2-codex",
            Model::Gpt52 => "openai/gpt-5.2",
            Model::Gpt41Mini => "openai/gpt-4.1-mini",
            Model::Gemini3FlashPreview => "google/gemini-3-flash-preview",
            Model::Gemini3ProPreview => "google/gemini-3-pro-preview",
            Model::ClaudeOpus46 => "anthropic/claude-opus-4.6",
            Model::ClaudeSonnet45 => "anthropic/claude-sonnet-4.5",
            Model::Custom(s) => s,
        }
    }

    /// Default model for the writer role
    pub fn default_writer() -> Model {
        Model::ClaudeOpus46
    }

    /// Default reviewer models, one per independent review route
    pub fn default_reviewers() -> Vec<Model> {
        vec![Model::Gpt52Codex, Model::Gemini3FlashPreview]
    }

    /// Default model that consolidates reviewer findings
    pub fn default_collator() -> Model {
        Model::ClaudeOpus46
    }

    /// Provider prefix (`openai`, `google`, ...) if the identifier has one
    pub fn provider(&self) -> Option<&str> {
        self.as_str().split_once('/').map(|(provider, _)| provider)
    }
}

impl Default for Model {
    /// Returns the default writer model
    fn default() -> Self {
        Model::default_writer()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "openai/gpt-5.2-codex" => Model::Gpt52Codex,
            "openai/gpt-5.2" => Model::Gpt52,
            "openai/gpt-4.1-mini" => Model::Gpt41Mini,
            "google/gemini-3-flash-preview" => Model::Gemini3FlashPreview,
            "google/gemini-3-pro-preview" => Model::Gemini3ProPreview,
            "anthropic/claude-opus-4.6" => Model::ClaudeOpus46,
            "anthropic/claude-sonnet-4.5" => Model::ClaudeSonnet45,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
