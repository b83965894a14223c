//! Draft domain: candidate file contents produced by the writer.

pub mod entities;
pub mod parsing;

pub use entities::{Draft, DraftAction};
pub use parsing::{StructuredWriterResponse, parse_writer_output, strip_code_fence};
