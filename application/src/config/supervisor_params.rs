//! Supervisor parameters for run loop control
//!
//! [`SupervisorParams`] groups the static parameters that bound a
//! [`SuperviseTaskUseCase`](crate::use_cases::supervise::SuperviseTaskUseCase)
//! run. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default writer-call bound
pub const DEFAULT_MAX_ITERATIONS: u32 = 2;

/// Default per-call timeout for writer and reviewer capabilities
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Loop control parameters for one supervisor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorParams {
    /// Maximum writer calls. `0` means a single writer/reviewer pass.
    pub max_iterations: u32,
    /// Deadline for each individual writer or reviewer call.
    pub call_timeout: Duration,
}

impl Default for SupervisorParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl SupervisorParams {
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Build from a timeout in seconds.
    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        self.with_call_timeout(Duration::from_secs(seconds))
    }
}
