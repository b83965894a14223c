//! Progress reporting for supervisor runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reviewer_application::ports::progress::ProgressNotifier;
use reviewer_domain::core::string::first_line;
use reviewer_domain::{Draft, ReviewVerdict, SupervisorStatus, TaskRequest, ViolationReport};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Width of one-line violation notes
const MAX_NOTE_WIDTH: usize = 72;

/// Reports progress with a single iteration bar on stderr
pub struct ProgressReporter {
    draw_target: fn() -> ProgressDrawTarget,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            draw_target: ProgressDrawTarget::stderr,
            bar: Mutex::new(None),
        }
    }

    /// Reporter that tracks state without drawing anything
    pub fn hidden() -> Self {
        Self {
            draw_target: ProgressDrawTarget::hidden,
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:20.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_message(&self, message: String) {
        if let Some(pb) = self.slot().as_ref() {
            pb.set_message(message);
        }
    }

    /// Current bar position, if a run is in progress
    pub fn position(&self) -> Option<u64> {
        self.slot().as_ref().map(|pb| pb.position())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_task_start(&self, request: &TaskRequest, budget: u32) {
        let pb = ProgressBar::with_draw_target(Some(budget as u64), (self.draw_target)());
        pb.set_style(Self::bar_style());
        pb.set_prefix(request.path().to_string());
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        *self.slot() = Some(pb);
    }

    fn on_writer_start(&self, iteration: u32) {
        self.set_message(format!("writing draft {}", iteration));
    }

    fn on_draft(&self, draft: &Draft) {
        self.set_message(format!("draft {} ready ({})", draft.iteration, draft.action));
    }

    fn on_reviewer_start(&self, iteration: u32) {
        self.set_message(format!("reviewing draft {}", iteration));
    }

    fn on_review(&self, report: &ViolationReport, verdict: ReviewVerdict) {
        if let Some(pb) = self.slot().as_ref() {
            pb.inc(1);
            let message = match verdict {
                ReviewVerdict::Compliant => format!("{} compliant", "v".green()),
                ReviewVerdict::Revise => {
                    format!("{} {} error(s), revising", "x".red(), report.error_count())
                }
                ReviewVerdict::Exhausted => {
                    format!("{} {} error(s) left", "!".yellow(), report.error_count())
                }
            };
            pb.set_message(message);
        }
    }

    fn on_finish(&self, status: SupervisorStatus, iterations: u32) {
        if let Some(pb) = self.slot().take() {
            let label = match status {
                SupervisorStatus::Compliant => status.as_str().green(),
                SupervisorStatus::Exhausted => status.as_str().yellow(),
                _ => status.as_str().red(),
            };
            pb.finish_with_message(format!("{} after {} iteration(s)", label, iterations));
        }
    }
}

/// Plain line-per-event progress on stderr, for non-terminal output
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_task_start(&self, request: &TaskRequest, budget: u32) {
        eprintln!(
            "{} {} (up to {} iteration(s))",
            "->".cyan(),
            request.path().bold(),
            budget
        );
    }

    fn on_writer_start(&self, iteration: u32) {
        eprintln!("  writing draft {}", iteration);
    }

    fn on_draft(&self, draft: &Draft) {
        eprintln!("  {}", draft.note());
    }

    fn on_review(&self, report: &ViolationReport, verdict: ReviewVerdict) {
        match verdict {
            ReviewVerdict::Compliant => eprintln!("  {} compliant", "v".green()),
            _ => {
                eprintln!(
                    "  {} {} error(s), {} warning(s)",
                    "x".red(),
                    report.error_count(),
                    report.warning_count()
                );
                for violation in report.errors() {
                    eprintln!(
                        "    {} {}",
                        violation.rule_id.dimmed(),
                        first_line(&violation.description, MAX_NOTE_WIDTH)
                    );
                }
            }
        }
    }

    fn on_finish(&self, status: SupervisorStatus, iterations: u32) {
        eprintln!("{} {} after {} iteration(s)", "->".cyan(), status, iterations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewer_domain::Violation;

    #[test]
    fn test_reporter_tracks_reviews() {
        let reporter = ProgressReporter::hidden();
        let request = TaskRequest::new("src/app.py", "Add hints").unwrap();

        assert_eq!(reporter.position(), None);
        reporter.on_task_start(&request, 2);
        reporter.on_writer_start(1);
        reporter.on_draft(&Draft::new("src/app.py", "x").with_iteration(1));
        reporter.on_reviewer_start(1);
        reporter.on_review(
            &ViolationReport::new(vec![Violation::error("CONS-1", "Missing hint")]),
            ReviewVerdict::Revise,
        );
        assert_eq!(reporter.position(), Some(1));

        reporter.on_finish(SupervisorStatus::Compliant, 2);
        assert_eq!(reporter.position(), None);
    }

    #[test]
    fn test_finish_without_start_is_noop() {
        let reporter = ProgressReporter::hidden();
        reporter.on_finish(SupervisorStatus::Failed, 0);
        assert_eq!(reporter.position(), None);
    }
}
