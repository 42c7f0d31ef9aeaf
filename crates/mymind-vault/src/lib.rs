//! # mymind-vault
//!
//! The note vault: a directory tree of Markdown files with frontmatter.
//!
//! The filesystem is the only store. Every command loads a fresh snapshot
//! of the corpus with [`corpus::load_notes`], works on it, and writes
//! results straight back to disk. Nothing is cached between invocations.
//!
//! - [`corpus`]: walk the vault, parse notes, derive body summaries
//! - [`dedup`]: find an existing note by content fingerprint
//! - [`related`]: tag-overlap relations and the generated `## Related` section
//! - [`writer`]: render and persist new notes under unique paths
//! - [`search`]: tag and text token filtering
//! - [`scan`]: regenerate frontmatter for existing Markdown files
//! - [`recap`]: collect recent notes and persist a recap note

pub mod corpus;
pub mod dedup;
pub mod recap;
pub mod related;
pub mod scan;
pub mod search;
pub mod writer;

use std::path::{Path, PathBuf};

use mymind_core::{AiResult, ContentInput, Note, Result};

pub use corpus::{extract_summary, load_notes, load_summary};
pub use dedup::find_duplicate;
pub use related::{compute_related, LinkReport};
pub use scan::ScanReport;
pub use search::SearchQuery;

/// A vault root plus the subfolder that receives new notes.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    note_dir: PathBuf,
}

impl Vault {
    /// Describe a vault; nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>, folder: &str) -> Self {
        let root = root.into();
        let note_dir = root.join(folder);
        Self { root, note_dir }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory new notes are written to.
    pub fn note_dir(&self) -> &Path {
        &self.note_dir
    }

    /// Load every note, most recent first.
    pub fn load_notes(&self) -> Result<Vec<Note>> {
        corpus::load_notes(&self.root)
    }

    /// Existing note whose source hash equals `hash`, if any.
    pub fn find_duplicate(&self, hash: &str) -> Result<Option<Note>> {
        let notes = self.load_notes()?;
        Ok(dedup::find_duplicate(&notes, hash).cloned())
    }

    /// Persist a new note in the note folder and return its path.
    pub fn write_note(
        &self,
        content: &ContentInput,
        result: &AiResult,
        hash: &str,
    ) -> Result<PathBuf> {
        writer::write_note(&self.note_dir, content, result, hash)
    }

    /// Rewrite the related section of every note in the vault.
    pub fn link(&self) -> Result<LinkReport> {
        related::link_vault(&self.root)
    }

    /// Update related sections after `new_note` was written.
    pub fn cascade_after_save(&self, new_note: &Path) -> Result<LinkReport> {
        related::cascade_after_save(&self.root, new_note)
    }
}
