//! Configuration file loading for code-reviewer
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `CODE_REVIEWER_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./code-reviewer.toml` or `./.code-reviewer.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/code-reviewer/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FileConfig,
    FileLoggingConfig, FileModelsConfig, FileOutputConfig, FileOutputFormat, FileProviderConfig,
    FileRulesConfig, FileSupervisorConfig,
};
pub use loader::ConfigLoader;
