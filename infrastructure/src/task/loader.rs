//! Local file system task loader

use reviewer_domain::{ContextFile, DomainError, Draft, TaskRequest};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while reading task inputs or writing the result
#[derive(Error, Debug)]
pub enum TaskLoadError {
    #[error(transparent)]
    InvalidTask(#[from] DomainError),

    #[error("Target path is not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Context file not found: {}", .0.display())]
    ContextNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Task loader that reads from the local file system.
///
/// `LocalTaskLoader` is stateless and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct LocalTaskLoader;

impl LocalTaskLoader {
    pub fn new() -> Self {
        Self
    }

    /// Build a task for `target`.
    ///
    /// The target's current content is attached when the file exists; a
    /// missing target means a new file. Context files must exist and keep
    /// the order given.
    pub fn load(
        &self,
        target: &Path,
        instructions: &str,
        context_paths: &[PathBuf],
    ) -> Result<TaskRequest, TaskLoadError> {
        let mut request = TaskRequest::new(target.to_string_lossy(), instructions)?;

        if let Some(content) = self.read_existing(target)? {
            debug!("Loaded existing content of {:?} ({} bytes)", target, content.len());
            request = request.with_existing_content(content);
        } else {
            debug!("Target {:?} does not exist; treating as new file", target);
        }

        let context = context_paths
            .iter()
            .map(|path| self.read_context(path))
            .collect::<Result<Vec<_>, _>>()?;
        request = request.with_context_files(context);

        info!(
            "Loaded task for {} ({} context file(s), new file: {})",
            request.path(),
            request.context_files().len(),
            request.is_new_file()
        );
        Ok(request)
    }

    /// Write the draft's content to its path, creating parent directories.
    pub fn persist(&self, draft: &Draft) -> Result<PathBuf, TaskLoadError> {
        let path = PathBuf::from(&draft.path);
        let write_err = |source| TaskLoadError::Write {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&path, &draft.content).map_err(write_err)?;

        info!("Wrote {} ({} bytes)", path.display(), draft.content.len());
        Ok(path)
    }

    fn read_existing(&self, target: &Path) -> Result<Option<String>, TaskLoadError> {
        if !target.exists() {
            return Ok(None);
        }
        if !target.is_file() {
            return Err(TaskLoadError::NotAFile(target.to_path_buf()));
        }
        fs::read_to_string(target)
            .map(Some)
            .map_err(|source| TaskLoadError::Read {
                path: target.to_path_buf(),
                source,
            })
    }

    fn read_context(&self, path: &Path) -> Result<ContextFile, TaskLoadError> {
        if !path.is_file() {
            return Err(TaskLoadError::ContextNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| TaskLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ContextFile::new(path.to_string_lossy(), content))
    }
}
