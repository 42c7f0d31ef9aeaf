//! Note data model and the content types flowing through the save pipeline.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::frontmatter::Frontmatter;

// =============================================================================
// NOTE KIND
// =============================================================================

/// What a note was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// Web page, tweet, or any URL that is not an image.
    Link,
    /// Plain text note (argument, stdin, or rescanned Markdown).
    #[default]
    Note,
    /// Image from a URL or the clipboard.
    Image,
    /// Local PDF document.
    Pdf,
    /// Periodic recap generated from other notes.
    Recap,
}

impl NoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Note => "note",
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::Recap => "recap",
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "link" => Ok(Self::Link),
            "note" => Ok(Self::Note),
            "image" => Ok(Self::Image),
            "pdf" => Ok(Self::Pdf),
            "recap" => Ok(Self::Recap),
            _ => Err(format!("Invalid note kind: {}", s)),
        }
    }
}

// =============================================================================
// NOTE
// =============================================================================

/// One persisted Markdown note, projected from its frontmatter.
///
/// The body summary is not part of the record; it is derived from the file
/// on demand (see `mymind_vault::corpus::load_summary`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    /// Filesystem location; the identity key.
    pub path: PathBuf,
    pub title: String,
    /// `None` when the field is missing or not valid RFC 3339.
    pub created: Option<DateTime<FixedOffset>>,
    pub kind: NoteKind,
    /// Original URL, file path, or `clipboard`; empty for plain notes.
    pub source: String,
    /// SHA-256 hex digest of the canonical input; empty when unknown.
    pub source_hash: String,
    pub tags: Vec<String>,
}

impl Note {
    pub fn new(path: impl Into<PathBuf>, frontmatter: Frontmatter) -> Self {
        Self {
            path: path.into(),
            title: frontmatter.title,
            created: frontmatter.created,
            kind: frontmatter.kind,
            source: frontmatter.source,
            source_hash: frontmatter.source_hash,
            tags: frontmatter.tags,
        }
    }

    /// Metadata portion of the note, ready to be rendered.
    pub fn frontmatter(&self) -> Frontmatter {
        Frontmatter {
            title: self.title.clone(),
            created: self.created,
            kind: self.kind,
            source: self.source.clone(),
            source_hash: self.source_hash.clone(),
            tags: self.tags.clone(),
        }
    }

    /// File name including the extension (`golang-tips.md`).
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }

    /// File name without the `.md` extension, used as the wiki-link target.
    pub fn stem(&self) -> String {
        let name = self.file_name();
        match name.strip_suffix(".md") {
            Some(stem) => stem.to_string(),
            None => name,
        }
    }

    /// Case-insensitive exact tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let target = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == target)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// =============================================================================
// AI RESULT
// =============================================================================

/// Title, tags, and summary produced by the analysis model.
///
/// Raw results carry whatever the model returned; call
/// [`AiResult::validated`](crate::tags) before persisting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

// =============================================================================
// CONTENT INPUT
// =============================================================================

/// Resolved user input, ready for fingerprinting and analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentInput {
    pub kind: NoteKind,
    /// Original URL, file path, or `clipboard`.
    pub source: String,
    /// Text handed to the model (links and notes).
    pub text: String,
    /// Raw bytes (images and PDFs).
    pub data: Vec<u8>,
    /// MIME type of `data`, e.g. `image/jpeg` or `application/pdf`.
    pub mime_type: String,
    /// File extension for a saved image, including the dot (`.jpg`).
    pub extension: String,
}

impl ContentInput {
    pub fn note(text: impl Into<String>) -> Self {
        Self {
            kind: NoteKind::Note,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn link(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NoteKind::Link,
            source: source.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn image(
        source: impl Into<String>,
        data: Vec<u8>,
        mime_type: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            kind: NoteKind::Image,
            source: source.into(),
            data,
            mime_type: mime_type.into(),
            extension: extension.into(),
            ..Default::default()
        }
    }

    pub fn pdf(source: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            kind: NoteKind::Pdf,
            source: source.into(),
            data,
            mime_type: "application/pdf".to_string(),
            ..Default::default()
        }
    }

    /// Content fingerprint used as the deduplication key.
    ///
    /// Links hash the URL (not the fetched page), images and PDFs hash their
    /// bytes, everything else hashes the text.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        match self.kind {
            NoteKind::Link => hasher.update(self.source.as_bytes()),
            NoteKind::Image | NoteKind::Pdf => hasher.update(&self.data),
            NoteKind::Note | NoteKind::Recap => hasher.update(self.text.as_bytes()),
        }
        hex::encode(hasher.finalize())
    }
}

// =============================================================================
// RELATED NOTES
// =============================================================================

/// One entry of a note's generated related section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedNote {
    /// File stem of the related note (wiki-link target).
    pub name: String,
    pub title: String,
    /// Tags both notes carry, in the related note's own tag order.
    pub shared_tags: Vec<String>,
}
