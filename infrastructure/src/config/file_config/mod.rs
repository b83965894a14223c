//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain/application types
//! on demand.

mod logging;
mod models;
mod output;
mod provider;
mod rules;
mod supervisor;

pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use provider::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileProviderConfig};
pub use rules::FileRulesConfig;
pub use supervisor::FileSupervisorConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("supervisor.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("models.{0}: model name cannot be empty")]
    EmptyModelName(&'static str),

    #[error("provider.base_url cannot be empty")]
    EmptyBaseUrl,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Iteration bound and per-call timeout
    pub supervisor: FileSupervisorConfig,
    /// Responses API endpoint and credentials
    pub provider: FileProviderConfig,
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Writer and reviewer rules documents
    pub rules: FileRulesConfig,
    /// Conversation transcript
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.supervisor.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        for (field, name) in self.models.named_fields() {
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName(field));
            }
        }
        if self.models.reviewers.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyModelName("reviewers"));
        }

        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }

        Ok(())
    }
}
