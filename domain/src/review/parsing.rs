//! Structured reviewer output parsing.
//!
//! Reviewer and collator models answer with `{"issues": [...]}`. These
//! functions decode that payload and fold a consolidated issue list into a
//! [`ViolationReport`]. Pure domain logic, no I/O.

use super::entities::{Severity, Violation, ViolationReport};
use crate::core::error::DomainError;
use crate::draft::parsing::strip_code_fence;
use serde::{Deserialize, Serialize};

/// One finding as emitted by a reviewer model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewIssue {
    pub file_path: String,
    pub issue: String,
    /// Rule name or identifier that was violated
    pub violation: String,
    pub suggested_fix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Top-level reviewer payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredIssuesResponse {
    #[serde(default)]
    pub issues: Vec<ReviewIssue>,
}

/// Issues attributed to the model that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelReviewResult {
    pub model: String,
    pub issues: Vec<ReviewIssue>,
}

/// Decode a reviewer payload.
///
/// Issues with a blank `issue` text are dropped; the schema requires a
/// non-empty statement, and some models pad the list with empty entries.
pub fn parse_review_issues(raw: &str) -> Result<Vec<ReviewIssue>, DomainError> {
    let response: StructuredIssuesResponse = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| DomainError::MalformedOutput(format!("review payload: {}", e)))?;

    Ok(response
        .issues
        .into_iter()
        .filter(|issue| !issue.issue.trim().is_empty())
        .collect())
}

/// Build the report for a consolidated issue list.
///
/// Violations are numbered `CONS-1`, `CONS-2`, ... in list order.
pub fn build_consolidated_report(issues: &[ReviewIssue]) -> ViolationReport {
    let violations = issues
        .iter()
        .enumerate()
        .map(|(index, issue)| {
            let mut violation = Violation::new(
                format!("CONS-{}", index + 1),
                issue.issue.clone(),
                Severity::from_label(issue.severity.as_deref()),
            )
            .with_standard(issue.violation.clone())
            .with_location(issue.file_path.clone());
            if !issue.suggested_fix.trim().is_empty() {
                violation = violation.with_suggestion(issue.suggested_fix.clone());
            }
            violation
        })
        .collect();

    ViolationReport::new(violations).with_summary(format!(
        "Consolidated reviewer found {} issue(s) across provided files.",
        issues.len()
    ))
}
