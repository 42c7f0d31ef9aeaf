//! Recap support: pick recent notes, build the digest handed to the model,
//! and store the generated recap as a note of kind `recap`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, FixedOffset};
use mymind_core::defaults::{NOTE_EXTENSION, RECAP_MAX_CHARS};
use mymind_core::{slugify, Error, Frontmatter, Note, NoteKind, Result};
use tracing::{debug, warn};

use crate::corpus::load_summary;
use crate::writer::unique_path;

/// Parse a period such as `24h`, `7d`, or `2w`.
pub fn parse_period(period: &str) -> Result<Duration> {
    let period = period.trim();
    let invalid = || Error::InvalidInput(format!("invalid period: {:?}", period));

    let unit = period.chars().last().ok_or_else(invalid)?;
    let number = &period[..period.len() - unit.len_utf8()];
    if number.is_empty() {
        return Err(invalid());
    }
    let n: i64 = number
        .parse()
        .map_err(|_| Error::InvalidInput(format!("invalid period number: {:?}", period)))?;

    let duration = match unit {
        'h' => Duration::try_hours(n),
        'd' => Duration::try_days(n),
        'w' => Duration::try_weeks(n),
        other => {
            return Err(Error::InvalidInput(format!(
                "unknown period unit {:?}, use h/d/w",
                other
            )))
        }
    };
    duration.ok_or_else(invalid)
}

/// Notes created strictly after `now - period`, keeping corpus order.
///
/// Undated notes are never included.
pub fn notes_since(notes: &[Note], period: Duration, now: DateTime<FixedOffset>) -> Vec<&Note> {
    let cutoff = now - period;
    notes
        .iter()
        .filter(|n| n.created.is_some_and(|c| c > cutoff))
        .collect()
}

/// Build the text digest of `notes`, loading each body summary from disk.
pub fn build_digest(notes: &[&Note]) -> String {
    build_digest_with(notes, |note| match load_summary(note) {
        Ok(summary) => summary,
        Err(e) => {
            warn!(note_path = %note.path.display(), error = %e, "recap: could not load note body");
            String::new()
        }
    })
}

/// Digest built with a custom summary source.
///
/// Entries are appended until the digest exceeds the recap size cap; the
/// result is then cut to the cap on a character boundary.
pub fn build_digest_with<F>(notes: &[&Note], mut summary: F) -> String
where
    F: FnMut(&Note) -> String,
{
    let mut out = String::new();
    for note in notes {
        out.push_str(&format!("## {}\n", note.title));
        if let Some(created) = note.created {
            out.push_str(&format!("Date: {}\n", created.format("%Y-%m-%d %H:%M")));
        }
        if !note.tags.is_empty() {
            out.push_str(&format!("Tags: {}\n", note.tags.join(", ")));
        }
        let text = summary(note);
        if !text.is_empty() {
            out.push_str(&format!("\n{}\n", text));
        }
        out.push_str("\n---\n\n");

        if out.len() > RECAP_MAX_CHARS {
            break;
        }
    }

    if out.len() > RECAP_MAX_CHARS {
        let mut cut = RECAP_MAX_CHARS;
        while !out.is_char_boundary(cut) {
            cut -= 1;
        }
        out.truncate(cut);
    }
    out
}

/// Render a recap note.
pub fn render_recap(period: &str, recap: &str, now: DateTime<FixedOffset>) -> String {
    let fm = Frontmatter {
        title: format!("Recap {}", period),
        created: Some(now),
        kind: NoteKind::Recap,
        tags: vec!["recap".to_string()],
        ..Default::default()
    };
    let mut out = fm.render();
    out.push('\n');
    out.push_str(recap);
    out.push('\n');
    out
}

/// Store a recap at the vault root as `recap-<period>.md` (or the next free
/// name) and return its path.
pub fn write_recap(
    root: &Path,
    period: &str,
    recap: &str,
    now: DateTime<FixedOffset>,
) -> Result<PathBuf> {
    fs::create_dir_all(root)?;
    let slug = slugify(&format!("recap-{}", period));
    let path = unique_path(&root.join(format!("{}.{}", slug, NOTE_EXTENSION)));

    let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
    file.write_all(render_recap(period, recap, now).as_bytes())?;

    debug!(note_path = %path.display(), "recap written");
    Ok(path)
}
