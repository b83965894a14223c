//! Rules file configuration from TOML (`[rules]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Paths to the coding-rules documents.
///
/// Unset paths fall back to the built-in rules.
///
/// ```toml
/// [rules]
/// writer_rules_file = "docs/writer_rules.md"
/// reviewer_rules_file = "docs/review_rules.md"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRulesConfig {
    pub writer_rules_file: Option<PathBuf>,
    pub reviewer_rules_file: Option<PathBuf>,
}
