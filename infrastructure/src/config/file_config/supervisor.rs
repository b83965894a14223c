//! Supervisor loop configuration from TOML (`[supervisor]` section)

use reviewer_application::SupervisorParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw supervisor configuration from TOML
///
/// # Example
///
/// ```toml
/// [supervisor]
/// max_iterations = 3     # writer calls before giving up (0 = single pass)
/// timeout_seconds = 120  # deadline for each writer/reviewer call
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSupervisorConfig {
    pub max_iterations: u32,
    pub timeout_seconds: u64,
}

impl Default for FileSupervisorConfig {
    fn default() -> Self {
        let params = SupervisorParams::default();
        Self {
            max_iterations: params.max_iterations,
            timeout_seconds: params.call_timeout.as_secs(),
        }
    }
}

impl FileSupervisorConfig {
    /// Convert to application-layer [`SupervisorParams`]
    pub fn to_params(&self) -> SupervisorParams {
        SupervisorParams::default()
            .with_max_iterations(self.max_iterations)
            .with_call_timeout(Duration::from_secs(self.timeout_seconds))
    }
}
