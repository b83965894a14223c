//! Task input loading from the local file system
//!
//! - [`LocalTaskLoader`] — builds a [`TaskRequest`](reviewer_domain::TaskRequest)
//!   from the target path, instructions and context files, and persists the
//!   final draft
//! - [`RulesLoader`] — reads the writer/reviewer rules documents

mod loader;
mod rules;

pub use loader::{LocalTaskLoader, TaskLoadError};
pub use rules::{RulesError, RulesLoader};
