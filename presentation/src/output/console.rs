//! Console output formatter for supervisor outcomes

use colored::Colorize;
use reviewer_domain::{Severity, SupervisorOutcome, SupervisorStatus, Violation, ViolationReport};

/// Formats supervisor results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome: status, report and final draft
    pub fn format(outcome: &SupervisorOutcome) -> String {
        let mut output = String::new();
        let draft = outcome.draft();

        output.push_str(&Self::header("Code Review Result"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Target:".cyan().bold(), draft.path));
        output.push_str(&format!(
            "{} {}\n",
            "Outcome:".cyan().bold(),
            Self::status_label(outcome.status())
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Iterations:".cyan().bold(),
            outcome.iterations()
        ));
        output.push_str(&format!("{} {}\n", "Action:".cyan().bold(), draft.action));
        if let Some(explanation) = &draft.explanation {
            output.push_str(&format!("{} {}\n", "Explanation:".cyan().bold(), explanation));
        }

        output.push_str(&Self::section_header("Review"));
        output.push_str(&Self::format_report(outcome.report()));

        output.push_str(&Self::section_header("Final Draft"));
        if draft.is_empty() {
            output.push_str(&format!("{}\n", "(empty file)".dimmed()));
        } else {
            output.push_str(&Self::indent(&draft.content, "  "));
            output.push('\n');
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &SupervisorOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a fatal error as JSON, matching the outcome shape
    pub fn format_error_json(status: SupervisorStatus, error: &str) -> String {
        serde_json::to_string_pretty(&serde_json::json!({
            "outcome": status.as_str(),
            "error": error,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a report summary followed by one block per violation
    pub fn format_report(report: &ViolationReport) -> String {
        let mut output = format!(
            "{} ({} error(s), {} warning(s))\n",
            report.summary(),
            report.error_count(),
            report.warning_count()
        );

        for violation in report.violations() {
            output.push_str(&Self::format_violation(violation));
        }

        output
    }

    fn format_violation(violation: &Violation) -> String {
        let severity = match violation.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };

        let mut output = format!("\n  [{}] {}", severity, violation.rule_id.bold());
        if let Some(location) = &violation.location {
            output.push_str(&format!(" {}", location.dimmed()));
        }
        output.push('\n');
        output.push_str(&format!("{}\n", Self::indent(&violation.description, "    ")));
        if let Some(standard) = &violation.standard {
            output.push_str(&format!("    {} {}\n", "rule:".dimmed(), standard));
        }
        if let Some(suggestion) = &violation.suggestion {
            output.push_str(&format!("    {} {}\n", "fix:".dimmed(), suggestion));
        }
        output
    }

    fn status_label(status: SupervisorStatus) -> String {
        match status {
            SupervisorStatus::Compliant => "COMPLIANT".green().bold().to_string(),
            SupervisorStatus::Exhausted => "EXHAUSTED".yellow().bold().to_string(),
            other => other.as_str().to_uppercase().red().bold().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
