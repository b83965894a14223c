//! Review domain: violations, severity and violation reports.
//!
//! A report is *compliant* when it holds no [`Severity::Error`] violation.
//! Warnings travel with the report but never trigger another writer pass.

pub mod entities;
pub mod parsing;

pub use entities::{Severity, Violation, ViolationReport};
pub use parsing::{
    ModelReviewResult, ReviewIssue, StructuredIssuesResponse, build_consolidated_report,
    parse_review_issues,
};
