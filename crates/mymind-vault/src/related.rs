//! Related-notes engine.
//!
//! Two notes are related when their tag sets intersect. Each note carries a
//! generated `## Related` section at the end of its file listing those
//! notes as wiki links:
//!
//! ```text
//! ## Related
//!
//! - [[go-channels|Go channels]] (concurrency, golang)
//! - [[rust-async|Rust async]] (concurrency)
//! ```
//!
//! The section is always regenerated as a whole: the document is treated as
//! a verbatim prefix (everything before the marker) plus a generated
//! suffix, which makes repeated passes idempotent.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use mymind_core::defaults::RELATED_MARKER;
use mymind_core::{Note, RelatedNote, Result};
use tracing::{debug, info, instrument, warn};

use crate::corpus::load_notes;

/// Outcome of a vault-wide related-section pass.
#[derive(Debug, Default)]
pub struct LinkReport {
    /// Notes whose file content changed.
    pub updated: usize,
    /// Notes considered.
    pub total: usize,
    /// Notes that could not be read or written, with the error message.
    pub failures: Vec<(PathBuf, String)>,
}

/// Rank the notes related to `note` by shared tags.
///
/// The note itself is excluded by file name. Shared tags follow the related
/// note's own tag order. Ranking is by shared-tag count descending, then by
/// file stem ascending.
pub fn compute_related(note: &Note, corpus: &[Note]) -> Vec<RelatedNote> {
    let own_name = note.file_name();
    let tag_set: HashSet<&str> = note.tags.iter().map(String::as_str).collect();

    let mut related: Vec<RelatedNote> = corpus
        .iter()
        .filter(|other| other.file_name() != own_name)
        .filter_map(|other| {
            let shared: Vec<String> = other
                .tags
                .iter()
                .filter(|t| tag_set.contains(t.as_str()))
                .cloned()
                .collect();
            if shared.is_empty() {
                return None;
            }
            Some(RelatedNote {
                name: other.stem(),
                title: other.title.clone(),
                shared_tags: shared,
            })
        })
        .collect();

    related.sort_by(|a, b| {
        b.shared_tags
            .len()
            .cmp(&a.shared_tags.len())
            .then_with(|| a.name.cmp(&b.name))
    });
    related
}

/// Render the section, starting with the marker. Empty input renders "".
pub fn render_related_section(related: &[RelatedNote]) -> String {
    if related.is_empty() {
        return String::new();
    }

    let mut out = String::from(RELATED_MARKER);
    out.push('\n');
    for r in related {
        out.push_str(&format!(
            "- [[{}|{}]] ({})\n",
            r.name,
            r.title,
            r.shared_tags.join(", ")
        ));
    }
    out
}

/// Content before the related marker, or the whole content without one.
pub fn strip_related_section(content: &str) -> &str {
    match content.find(RELATED_MARKER) {
        Some(idx) => &content[..idx + 1],
        None => content,
    }
}

/// Replace whatever related section `content` has with a fresh one.
///
/// Trailing newlines of the kept prefix are normalized to exactly one.
pub fn apply_related(content: &str, related: &[RelatedNote]) -> String {
    let prefix = strip_related_section(content).trim_end_matches('\n');
    let mut out = String::with_capacity(prefix.len() + 1);
    out.push_str(prefix);
    out.push('\n');
    out.push_str(&render_related_section(related));
    out
}

/// Rewrite one note's related section. Returns whether the file changed.
pub fn update_note_related(path: &Path, related: &[RelatedNote]) -> Result<bool> {
    let old = fs::read_to_string(path)?;
    let new = apply_related(&old, related);
    if new == old {
        return Ok(false);
    }
    fs::write(path, new)?;
    Ok(true)
}

fn update_into_report(report: &mut LinkReport, note: &Note, corpus: &[Note]) {
    let related = compute_related(note, corpus);
    match update_note_related(&note.path, &related) {
        Ok(true) => report.updated += 1,
        Ok(false) => {}
        Err(e) => {
            warn!(note_path = %note.path.display(), error = %e, "could not update related section");
            report.failures.push((note.path.clone(), e.to_string()));
        }
    }
}

/// Regenerate the related section of every note in the vault.
///
/// A note that cannot be rewritten is reported and skipped; the pass
/// continues with the rest.
#[instrument(fields(subsystem = "vault", component = "related", op = "link_vault"))]
pub fn link_vault(root: &Path) -> Result<LinkReport> {
    let start = Instant::now();
    let notes = load_notes(root)?;
    let mut report = LinkReport {
        total: notes.len(),
        ..Default::default()
    };

    for note in &notes {
        update_into_report(&mut report, note, &notes);
    }

    info!(
        updated = report.updated,
        total = report.total,
        failures = report.failures.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "link pass complete"
    );
    Ok(report)
}

/// Update related sections after a note was written at `new_note`.
///
/// The new note gets a section only when it has relations; every other note
/// is regenerated because its candidate set may now include the new one.
/// Returns an empty report when `new_note` is not part of the corpus.
#[instrument(fields(subsystem = "vault", component = "related", op = "cascade"))]
pub fn cascade_after_save(root: &Path, new_note: &Path) -> Result<LinkReport> {
    let notes = load_notes(root)?;
    let Some(current) = notes.iter().find(|n| n.path == new_note) else {
        debug!(note_path = %new_note.display(), "new note not in corpus, skipping cascade");
        return Ok(LinkReport::default());
    };

    let mut report = LinkReport {
        total: notes.len(),
        ..Default::default()
    };

    let related = compute_related(current, &notes);
    if !related.is_empty() {
        match update_note_related(&current.path, &related) {
            Ok(true) => report.updated += 1,
            Ok(false) => {}
            Err(e) => {
                warn!(note_path = %current.path.display(), error = %e, "could not link new note");
                report.failures.push((current.path.clone(), e.to_string()));
            }
        }
    }

    for note in notes.iter().filter(|n| n.path != new_note) {
        update_into_report(&mut report, note, &notes);
    }

    debug!(
        updated = report.updated,
        failures = report.failures.len(),
        "cascade complete"
    );
    Ok(report)
}
