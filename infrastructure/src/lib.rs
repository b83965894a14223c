//! Infrastructure layer for code-reviewer
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod responses;
pub mod task;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileModelsConfig,
    FileOutputConfig, FileOutputFormat, FileProviderConfig, FileRulesConfig,
    FileSupervisorConfig,
};
pub use logging::JsonlConversationLogger;
pub use responses::ResponsesGateway;
pub use task::{LocalTaskLoader, RulesError, RulesLoader, TaskLoadError};
