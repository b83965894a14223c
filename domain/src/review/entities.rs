//! Review entities: violations and the report the reviewer returns

use serde::{Deserialize, Serialize};

/// How serious a violation is.
///
/// Only [`Severity::Error`] blocks compliance; warnings are reported but
/// never send the draft back to the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// Lenient parse of a model-supplied severity label.
    ///
    /// `warning`, `warn`, `low` and `info` are warnings. Anything else,
    /// including a missing label, is an error.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("warning" | "warn" | "low" | "info") => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One rule infraction found in a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    pub description: String,
    pub severity: Severity,
    /// Rule or standard the finding cites, as named by the reviewer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    /// Where the problem is, e.g. `src/a.py:10`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Concrete remediation instruction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Violation {
    pub fn new(
        rule_id: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            description: description.into(),
            severity,
            standard: None,
            location: None,
            suggestion: None,
        }
    }

    pub fn error(rule_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(rule_id, description, Severity::Error)
    }

    pub fn warning(rule_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(rule_id, description, Severity::Warning)
    }

    pub fn with_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Structured reviewer output for one draft.
///
/// `compliant` is derived from the violations at construction time and
/// cannot drift from them: it is true iff no violation has error severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReportRecord")]
pub struct ViolationReport {
    summary: String,
    compliant: bool,
    violations: Vec<Violation>,
}

#[derive(Deserialize)]
struct ReportRecord {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    violations: Vec<Violation>,
}

impl From<ReportRecord> for ViolationReport {
    fn from(record: ReportRecord) -> Self {
        let report = ViolationReport::new(record.violations);
        match record.summary {
            Some(summary) => report.with_summary(summary),
            None => report,
        }
    }
}

impl ViolationReport {
    pub fn new(violations: Vec<Violation>) -> Self {
        let compliant = !violations.iter().any(Violation::is_error);
        let summary = format!("Reviewer found {} issue(s).", violations.len());
        Self {
            summary,
            compliant,
            violations,
        }
    }

    /// A report with no findings at all.
    pub fn clean() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn is_compliant(&self) -> bool {
        self.compliant
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations.len() - self.error_count()
    }
}
