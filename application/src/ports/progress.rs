//! Progress notification port
//!
//! Defines the interface for reporting progress during a supervisor run.

use reviewer_domain::{Draft, ReviewVerdict, SupervisorStatus, TaskRequest, ViolationReport};

/// Callback for progress updates during a supervisor run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called once the task is submitted
    fn on_task_start(&self, request: &TaskRequest, budget: u32);

    /// Called before each writer call
    fn on_writer_start(&self, iteration: u32);

    /// Called with the draft the writer returned
    fn on_draft(&self, draft: &Draft);

    /// Called before each reviewer call
    fn on_reviewer_start(&self, _iteration: u32) {}

    /// Called with the reviewer's report and where it sends the task next
    fn on_review(&self, report: &ViolationReport, verdict: ReviewVerdict);

    /// Called when the run reaches a terminal status
    fn on_finish(&self, status: SupervisorStatus, iterations: u32);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_task_start(&self, _request: &TaskRequest, _budget: u32) {}
    fn on_writer_start(&self, _iteration: u32) {}
    fn on_draft(&self, _draft: &Draft) {}
    fn on_review(&self, _report: &ViolationReport, _verdict: ReviewVerdict) {}
    fn on_finish(&self, _status: SupervisorStatus, _iterations: u32) {}
}
