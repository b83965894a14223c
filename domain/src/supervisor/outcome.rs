//! Terminal results of a supervisor run

use super::state::{SupervisorState, SupervisorStatus};
use crate::core::error::DomainError;
use crate::draft::entities::Draft;
use crate::review::entities::ViolationReport;
use serde::{Deserialize, Serialize};

/// The last draft together with the review that decided the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalDraft {
    pub draft: Draft,
    pub report: ViolationReport,
    /// Writer calls it took
    pub iterations: u32,
}

/// Expected end of a supervisor run.
///
/// Exhaustion is a normal outcome, not an error: the caller decides what
/// to do with unresolved violations (escalate to a human, retry the task).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SupervisorOutcome {
    Compliant(FinalDraft),
    Exhausted(FinalDraft),
}

impl SupervisorOutcome {
    /// Extract the outcome from a state that ended in `compliant` or
    /// `exhausted`.
    pub fn from_state(state: &SupervisorState) -> Result<Self, DomainError> {
        let status = state.status();
        let (Some(draft), Some(report)) = (state.current_draft(), state.last_report()) else {
            return Err(DomainError::transition(status, "finish"));
        };

        let final_draft = FinalDraft {
            draft: draft.clone(),
            report: report.clone(),
            iterations: state.iteration_count(),
        };

        match status {
            SupervisorStatus::Compliant => Ok(SupervisorOutcome::Compliant(final_draft)),
            SupervisorStatus::Exhausted => Ok(SupervisorOutcome::Exhausted(final_draft)),
            other => Err(DomainError::transition(other, "finish")),
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, SupervisorOutcome::Compliant(_))
    }

    pub fn final_draft(&self) -> &FinalDraft {
        match self {
            SupervisorOutcome::Compliant(f) | SupervisorOutcome::Exhausted(f) => f,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.final_draft().draft
    }

    pub fn report(&self) -> &ViolationReport {
        &self.final_draft().report
    }

    pub fn iterations(&self) -> u32 {
        self.final_draft().iterations
    }

    pub fn status(&self) -> SupervisorStatus {
        match self {
            SupervisorOutcome::Compliant(_) => SupervisorStatus::Compliant,
            SupervisorOutcome::Exhausted(_) => SupervisorStatus::Exhausted,
        }
    }
}
