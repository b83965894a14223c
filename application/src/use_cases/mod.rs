//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod review_draft;
pub mod supervise;
pub mod write_draft;
