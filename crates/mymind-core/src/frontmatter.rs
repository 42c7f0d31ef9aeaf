//! Frontmatter codec for note files.
//!
//! A note starts with a metadata block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: "Rust ownership"
//! created: "2024-05-01T10:00:00+02:00"
//! kind: link
//! source: "https://doc.rust-lang.org/book/"
//! source_hash: "9f86d0…"
//! tags:
//!   - ownership
//!   - rust
//! ---
//! ```
//!
//! Parsing is line based and lenient at the field level: unknown keys are
//! ignored, an unparseable `created` becomes `None`, an unknown `kind` falls
//! back to `note`. Only a missing opening or closing delimiter rejects the
//! file as a whole.

use std::path::Path;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::models::{Note, NoteKind};

/// Line that opens and closes the block.
pub const DELIMITER: &str = "---";

/// Prefix of one item in the `tags` sequence.
pub const TAG_ITEM_PREFIX: &str = "  - ";

/// Metadata stored in a note's frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frontmatter {
    pub title: String,
    /// `None` when missing or not valid RFC 3339.
    pub created: Option<DateTime<FixedOffset>>,
    pub kind: NoteKind,
    pub source: String,
    pub source_hash: String,
    pub tags: Vec<String>,
}

impl Frontmatter {
    /// Parse the block at the top of `content`.
    ///
    /// Returns the metadata together with the body that follows the closing
    /// delimiter, or `None` when the first non-empty line is not `---` or
    /// the block is never closed.
    pub fn split(content: &str) -> Option<(Self, &str)> {
        let mut offset = 0;
        let mut lines = content.split_inclusive('\n');

        loop {
            let line = lines.next()?;
            offset += line.len();
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed == DELIMITER {
                break;
            }
            return None;
        }

        let mut fm = Self::default();
        for raw_line in lines {
            offset += raw_line.len();
            let line = raw_line.trim_end_matches(|c| c == '\n' || c == '\r');

            if line.trim() == DELIMITER {
                return Some((fm, &content[offset..]));
            }

            if let Some(item) = line.strip_prefix(TAG_ITEM_PREFIX) {
                let tag = unquote_value(item.trim());
                if !tag.is_empty() {
                    fm.tags.push(tag);
                }
                continue;
            }

            if let Some((key, value)) = split_key_value(line) {
                fm.apply(key, value);
            }
        }

        None
    }

    /// Parse only the metadata, discarding the body.
    pub fn parse(content: &str) -> Option<Self> {
        Self::split(content).map(|(fm, _)| fm)
    }

    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "title" => self.title = unquote_value(value),
            "created" => {
                let raw = unquote_value(value);
                self.created = DateTime::parse_from_rfc3339(&raw).ok();
                if self.created.is_none() && !raw.is_empty() {
                    trace!(value = %raw, "frontmatter: unparseable created timestamp");
                }
            }
            "kind" => {
                let raw = unquote_value(value);
                self.kind = raw.parse().unwrap_or_default();
            }
            "source" => self.source = unquote_value(value),
            "source_hash" => self.source_hash = unquote_value(value),
            "tags" => {
                // Flow style (`tags: [a, b]`) from hand-written notes.
                let raw = value.trim();
                if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
                    self.tags.extend(
                        inner
                            .split(',')
                            .map(|t| unquote_value(t.trim()))
                            .filter(|t| !t.is_empty()),
                    );
                }
            }
            _ => {}
        }
    }

    /// Render the block, including both delimiters and a trailing newline.
    ///
    /// `title` and `created` are always written (quoted); `source` and
    /// `source_hash` are written quoted when non-empty; `tags` is always a
    /// block sequence, header only when empty.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(&format!("title: {}\n", quote(&self.title)));
        let created = self
            .created
            .map(|c| c.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();
        out.push_str(&format!("created: {}\n", quote(&created)));
        out.push_str(&format!("kind: {}\n", self.kind));
        if !self.source.is_empty() {
            out.push_str(&format!("source: {}\n", quote(&self.source)));
        }
        if !self.source_hash.is_empty() {
            out.push_str(&format!("source_hash: {}\n", quote(&self.source_hash)));
        }
        out.push_str("tags:\n");
        for tag in &self.tags {
            out.push_str(TAG_ITEM_PREFIX);
            out.push_str(tag);
            out.push('\n');
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out
    }
}

/// Parse a note file's content into a [`Note`] located at `path`.
pub fn parse_note(path: &Path, content: &str) -> Result<Note> {
    Frontmatter::parse(content)
        .map(|fm| Note::new(path, fm))
        .ok_or_else(|| Error::NotFrontmatter(path.to_path_buf()))
}

/// Body of a note: everything after the frontmatter block, or the whole
/// content when there is no block.
pub fn body(content: &str) -> &str {
    Frontmatter::split(content)
        .map(|(_, body)| body)
        .unwrap_or(content)
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Double-quote a value using JSON string escaping (a valid YAML scalar).
pub fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Strip and unescape quotes; unquoted values are returned trimmed.
pub fn unquote_value(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        if let Ok(value) = serde_json::from_str::<String>(raw) {
            return value;
        }
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].replace("''", "'");
    }
    raw.to_string()
}
