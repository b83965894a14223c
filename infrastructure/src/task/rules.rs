//! Rules documents for the writer and reviewer roles

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const BUILTIN_WRITER_RULES: &str = include_str!("../../rules/writer_rules.md");
const BUILTIN_REVIEWER_RULES: &str = include_str!("../../rules/review_rules.md");

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Rules file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read rules file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Rules file is empty: {}", .0.display())]
    Empty(PathBuf),
}

/// Loads rules text from configured paths, falling back to the built-in
/// documents when no path is set.
#[derive(Debug, Clone, Default)]
pub struct RulesLoader {
    writer_rules_file: Option<PathBuf>,
    reviewer_rules_file: Option<PathBuf>,
}

impl RulesLoader {
    pub fn new(writer_rules_file: Option<PathBuf>, reviewer_rules_file: Option<PathBuf>) -> Self {
        Self {
            writer_rules_file,
            reviewer_rules_file,
        }
    }

    pub fn writer_rules(&self) -> Result<String, RulesError> {
        Self::load(self.writer_rules_file.as_deref(), BUILTIN_WRITER_RULES)
    }

    pub fn reviewer_rules(&self) -> Result<String, RulesError> {
        Self::load(self.reviewer_rules_file.as_deref(), BUILTIN_REVIEWER_RULES)
    }

    fn load(path: Option<&Path>, builtin: &str) -> Result<String, RulesError> {
        let Some(path) = path else {
            return Ok(builtin.to_string());
        };

        if !path.is_file() {
            return Err(RulesError::NotFound(path.to_path_buf()));
        }

        let text = fs::read_to_string(path).map_err(|source| RulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if text.trim().is_empty() {
            return Err(RulesError::Empty(path.to_path_buf()));
        }

        debug!("Loaded rules from {:?} ({} bytes)", path, text.len());
        Ok(text)
    }
}
