//! Application-level configuration.
//!
//! - [`SupervisorParams`] — iteration bound and per-call timeout for a run

pub mod supervisor_params;

pub use supervisor_params::SupervisorParams;
