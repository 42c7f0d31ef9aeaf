//! Note corpus loader.
//!
//! Walks the vault, parses the frontmatter of every `.md` file, and returns
//! the notes ordered by creation time, most recent first. Files that are
//! not notes (no frontmatter, unreadable, not UTF-8) are left out; a vault
//! is allowed to hold incidental Markdown.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use mymind_core::frontmatter::{self, parse_note};
use mymind_core::{Error, Note, Result};
use tracing::{debug, instrument, trace, warn};
use walkdir::WalkDir;

/// Every `.md` file under `root`, in file-name order per directory.
///
/// Fails only when `root` itself cannot be walked; unreadable entries
/// further down are logged and skipped.
pub fn list_markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::VaultNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Error::VaultNotFound(root.to_path_buf()));
            }
            Err(e) => {
                warn!(error = %e, "corpus: skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(".md") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Load every note in the vault, most recent first.
///
/// Notes with equal (or missing) `created` keep their discovery order.
#[instrument(fields(subsystem = "vault", component = "corpus", op = "load_notes"))]
pub fn load_notes(root: &Path) -> Result<Vec<Note>> {
    let start = Instant::now();
    let files = list_markdown_files(root)?;

    let mut notes: Vec<Note> = files
        .iter()
        .filter_map(|path| match read_note(path) {
            Ok(note) => {
                trace!(note_path = %path.display(), "corpus: parsed note");
                Some(note)
            }
            Err(e) => {
                debug!(note_path = %path.display(), error = %e, "corpus: excluded file");
                None
            }
        })
        .collect();

    // Stable sort; None sorts before Some, so undated notes end up last.
    notes.sort_by(|a, b| b.created.cmp(&a.created));

    debug!(
        result_count = notes.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "corpus loaded"
    );
    Ok(notes)
}

/// Read and parse a single note file.
pub fn read_note(path: &Path) -> Result<Note> {
    let content = fs::read_to_string(path)?;
    parse_note(path, &content)
}

/// First paragraph after the first `# ` heading, lines joined by spaces.
///
/// Embedded images (`![[...]]`) are skipped. Returns an empty string when
/// there is no heading or no paragraph after it.
pub fn extract_summary(content: &str) -> String {
    let body = frontmatter::body(content);
    let mut past_heading = false;
    let mut paragraph: Vec<&str> = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();

        if !past_heading {
            if trimmed.starts_with("# ") {
                past_heading = true;
            }
            continue;
        }

        if trimmed.is_empty() {
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }

        if trimmed.starts_with("![[") {
            continue;
        }

        paragraph.push(trimmed);
    }

    paragraph.join(" ")
}

/// Read a note's file and derive its summary.
pub fn load_summary(note: &Note) -> Result<String> {
    let content = fs::read_to_string(&note.path)?;
    Ok(extract_summary(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn note_file(title: &str, created: &str) -> String {
        format!(
            "---\ntitle: \"{}\"\ncreated: \"{}\"\nkind: note\ntags:\n  - t\n---\n\n# {}\n\nSummary of {}.\n",
            title, created, title, title
        )
    }

    #[test]
    fn test_load_notes_orders_by_created_desc() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", &note_file("old", "2024-01-01T00:00:00Z"));
        write(dir.path(), "b.md", &note_file("new", "2024-06-01T00:00:00Z"));
        write(dir.path(), "sub/c.md", &note_file("mid", "2024-03-01T00:00:00Z"));

        let notes = load_notes(dir.path()).unwrap();
        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_load_notes_skips_non_notes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "note.md", &note_file("real", "2024-01-01T00:00:00Z"));
        write(dir.path(), "README.md", "# Just docs\n");
        write(dir.path(), "data.txt", &note_file("txt", "2024-01-01T00:00:00Z"));
        fs::write(dir.path().join("binary.md"), [0xFF, 0xFE, 0x00]).unwrap();

        let notes = load_notes(dir.path()).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "real");
    }

    #[test]
    fn test_load_notes_equal_created_keeps_discovery_order() {
        let dir = tempfile::tempdir().unwrap();
        let ts = "2024-01-01T00:00:00Z";
        write(dir.path(), "b.md", &note_file("b", ts));
        write(dir.path(), "a.md", &note_file("a", ts));
        write(dir.path(), "c.md", &note_file("c", ts));

        let notes = load_notes(dir.path()).unwrap();
        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_notes_undated_last() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", &note_file("undated", "not a date"));
        write(dir.path(), "b.md", &note_file("dated", "2020-01-01T00:00:00Z"));

        let notes = load_notes(dir.path()).unwrap();
        assert_eq!(notes[0].title, "dated");
        assert_eq!(notes[1].title, "undated");
        assert!(notes[1].created.is_none());
    }

    #[test]
    fn test_load_notes_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            load_notes(&missing),
            Err(Error::VaultNotFound(p)) if p == missing
        ));
    }

    #[test]
    fn test_extract_summary_first_paragraph() {
        let content = "---\ntitle: x\n---\n\n# X\n\n![[x.png]]\n\nFirst line\nsecond line\n\nLater paragraph.\n";
        assert_eq!(extract_summary(content), "First line second line");
    }

    #[test]
    fn test_extract_summary_without_heading_is_empty() {
        assert_eq!(extract_summary("---\ntitle: x\n---\nno heading here\n"), "");
    }

    #[test]
    fn test_load_summary_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "a.md", &note_file("alpha", "2024-01-01T00:00:00Z"));
        let note = read_note(&path).unwrap();
        assert_eq!(load_summary(&note).unwrap(), "Summary of alpha.");
    }
}
