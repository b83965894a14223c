//! Supervisor state machine.
//!
//! ```text
//! pending ─begin─▶ writing ─record_draft─▶ reviewing ─record_report─┬─▶ compliant
//!                     ▲                                             ├─▶ exhausted
//!                     └────────────────── revise ◀──────────────────┘
//! any non-terminal ─fail─▶ failed        any non-terminal ─cancel─▶ cancelled
//! ```
//!
//! The state is a plain value: the application layer calls the capabilities
//! and feeds their results in through the transition methods. Illegal
//! transitions are rejected with [`DomainError::InvalidTransition`] and leave
//! the state untouched.

use crate::core::error::DomainError;
use crate::draft::entities::Draft;
use crate::review::entities::ViolationReport;
use crate::task::entities::TaskRequest;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a supervisor run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorStatus {
    /// Created, not yet submitted
    #[default]
    Pending,
    /// Waiting on the writer capability
    Writing,
    /// Waiting on the reviewer capability
    Reviewing,
    /// Reviewer reported no error-severity violations
    Compliant,
    /// Iteration budget spent with violations remaining
    Exhausted,
    /// A capability call failed or timed out
    Failed,
    /// Caller cancelled between transitions
    Cancelled,
}

impl SupervisorStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SupervisorStatus::Pending => "pending",
            SupervisorStatus::Writing => "writing",
            SupervisorStatus::Reviewing => "reviewing",
            SupervisorStatus::Compliant => "compliant",
            SupervisorStatus::Exhausted => "exhausted",
            SupervisorStatus::Failed => "failed",
            SupervisorStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SupervisorStatus::Compliant
                | SupervisorStatus::Exhausted
                | SupervisorStatus::Failed
                | SupervisorStatus::Cancelled
        )
    }
}

impl std::fmt::Display for SupervisorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who acts next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Writer,
    Reviewer,
    End,
}

/// Result of feeding a report into the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewVerdict {
    /// Error violations remain and budget is left: back to the writer
    Revise,
    /// Terminal: no error violations
    Compliant,
    /// Terminal: error violations remain and the budget is spent
    Exhausted,
}

/// Mutable state of one supervisor run.
///
/// Created once per task and exclusively owned by the task that drives it.
/// Serializable so a finished run can be kept as an audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorState {
    request: TaskRequest,
    current_draft: Option<Draft>,
    last_report: Option<ViolationReport>,
    iteration_count: u32,
    max_iterations: u32,
    status: SupervisorStatus,
    failure: Option<String>,
}

impl SupervisorState {
    pub fn new(request: TaskRequest, max_iterations: u32) -> Self {
        Self {
            request,
            current_draft: None,
            last_report: None,
            iteration_count: 0,
            max_iterations,
            status: SupervisorStatus::Pending,
            failure: None,
        }
    }

    // ==================== Accessors ====================

    pub fn request(&self) -> &TaskRequest {
        &self.request
    }

    pub fn current_draft(&self) -> Option<&Draft> {
        self.current_draft.as_ref()
    }

    pub fn last_report(&self) -> Option<&ViolationReport> {
        self.last_report.as_ref()
    }

    pub fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Effective number of writer calls allowed.
    ///
    /// `max_iterations = 0` still gets one writer pass and one review; it
    /// just never loops.
    pub fn budget(&self) -> u32 {
        self.max_iterations.max(1)
    }

    pub fn status(&self) -> SupervisorStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Failure cause recorded by [`fail`](Self::fail)
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Feedback for the next writer call: the most recent report, if any.
    pub fn feedback(&self) -> Option<&ViolationReport> {
        self.last_report.as_ref()
    }

    pub fn next_route(&self) -> Route {
        match self.status {
            SupervisorStatus::Pending | SupervisorStatus::Writing => Route::Writer,
            SupervisorStatus::Reviewing => Route::Reviewer,
            _ => Route::End,
        }
    }

    // ==================== Transitions ====================

    /// `pending → writing`
    pub fn begin(&mut self) -> Result<(), DomainError> {
        if self.status != SupervisorStatus::Pending {
            return Err(DomainError::transition(self.status, "begin"));
        }
        self.iteration_count = 0;
        self.status = SupervisorStatus::Writing;
        Ok(())
    }

    /// `writing → reviewing`: accept a new draft and count the writer call.
    ///
    /// The draft is stamped with the new iteration number. Returns a
    /// reference to the stored draft.
    pub fn record_draft(&mut self, draft: Draft) -> Result<&Draft, DomainError> {
        if self.status != SupervisorStatus::Writing || self.iteration_count >= self.budget() {
            return Err(DomainError::transition(self.status, "record_draft"));
        }
        self.iteration_count += 1;
        self.status = SupervisorStatus::Reviewing;
        let stored = self
            .current_draft
            .insert(draft.with_iteration(self.iteration_count));
        Ok(&*stored)
    }

    /// `reviewing → {writing | compliant | exhausted}`
    pub fn record_report(&mut self, report: ViolationReport) -> Result<ReviewVerdict, DomainError> {
        if self.status != SupervisorStatus::Reviewing {
            return Err(DomainError::transition(self.status, "record_report"));
        }

        let verdict = if report.is_compliant() {
            self.status = SupervisorStatus::Compliant;
            ReviewVerdict::Compliant
        } else if self.iteration_count >= self.budget() {
            self.status = SupervisorStatus::Exhausted;
            ReviewVerdict::Exhausted
        } else {
            self.status = SupervisorStatus::Writing;
            ReviewVerdict::Revise
        };
        self.last_report = Some(report);
        Ok(verdict)
    }

    /// Any non-terminal state `→ failed`. The iteration count is left as is.
    pub fn fail(&mut self, cause: impl Into<String>) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::transition(self.status, "fail"));
        }
        self.failure = Some(cause.into());
        self.status = SupervisorStatus::Failed;
        Ok(())
    }

    /// Any non-terminal state `→ cancelled`.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::transition(self.status, "cancel"));
        }
        self.status = SupervisorStatus::Cancelled;
        Ok(())
    }
}
