//! Subcommand implementations.
//!
//! Commands write their user-facing output to the writer they are given;
//! informational notices go to stderr and diagnostics through `tracing`.

pub mod batch;
pub mod link;
pub mod list;
pub mod open;
pub mod recap;
pub mod save;
pub mod scan;
pub mod search;

use mymind_core::Note;

/// `YYYY-MM-DD` of the note's creation, or dashes when undated.
pub(crate) fn format_date(note: &Note) -> String {
    note.created
        .map(|c| c.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string())
}
