//! Task request entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A reference file handed to the writer alongside the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFile {
    pub path: String,
    pub content: String,
}

impl ContextFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Immutable description of a single file-edit task.
///
/// Built once through the `with_*` methods and then only read. The
/// supervisor owns one per run and hands out shared references to the
/// writer capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    path: String,
    instructions: String,
    existing_content: Option<String>,
    context_files: Vec<ContextFile>,
}

impl TaskRequest {
    /// Create a task for `path`.
    ///
    /// Fails when the path is blank; instructions may be empty (a pure
    /// "bring this file into compliance" task).
    pub fn new(
        path: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(DomainError::InvalidTask(
                "target path cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            path,
            instructions: instructions.into(),
            existing_content: None,
            context_files: Vec::new(),
        })
    }

    pub fn with_existing_content(mut self, content: impl Into<String>) -> Self {
        self.existing_content = Some(content.into());
        self
    }

    pub fn with_context_file(mut self, file: ContextFile) -> Self {
        self.context_files.push(file);
        self
    }

    pub fn with_context_files(mut self, files: impl IntoIterator<Item = ContextFile>) -> Self {
        self.context_files.extend(files);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn existing_content(&self) -> Option<&str> {
        self.existing_content.as_deref()
    }

    /// Context files in the order they were supplied.
    pub fn context_files(&self) -> &[ContextFile] {
        &self.context_files
    }

    /// True when there is nothing to modify and the writer starts from scratch.
    pub fn is_new_file(&self) -> bool {
        self.existing_content
            .as_deref()
            .is_none_or(|content| content.is_empty())
    }
}
