//! Task domain: the immutable request a supervisor run works on.

pub mod entities;

pub use entities::{ContextFile, TaskRequest};
