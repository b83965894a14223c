//! Supervisor domain: the writer/reviewer iteration state machine and its
//! terminal outcomes.

pub mod outcome;
pub mod state;

pub use outcome::{FinalDraft, SupervisorOutcome};
pub use state::{ReviewVerdict, Route, SupervisorState, SupervisorStatus};
