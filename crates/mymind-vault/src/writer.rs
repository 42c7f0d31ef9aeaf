//! Note writer.
//!
//! Renders a resolved input plus its AI result into the canonical note
//! layout and persists it under a path that never overwrites an existing
//! file. Images are stored next to the note and embedded with `![[...]]`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Local};
use mymind_core::defaults::{CLIPBOARD_SOURCE, NOTE_EXTENSION};
use mymind_core::{slugify, AiResult, ContentInput, Frontmatter, NoteKind, Result};
use tracing::{debug, instrument, warn};

/// Render a complete note file.
///
/// `image_name` is the file name of the stored image, embedded only for
/// image content.
pub fn render_markdown(
    content: &ContentInput,
    result: &AiResult,
    hash: &str,
    created: DateTime<FixedOffset>,
    image_name: Option<&str>,
) -> String {
    let frontmatter = Frontmatter {
        title: result.title.clone(),
        created: Some(created),
        kind: content.kind,
        source: content.source.clone(),
        source_hash: hash.to_string(),
        tags: result.tags.clone(),
    };

    let mut out = frontmatter.render();
    out.push('\n');
    out.push_str(&format!("# {}\n\n", result.title));

    if content.kind == NoteKind::Image {
        if let Some(name) = image_name {
            out.push_str(&format!("![[{}]]\n\n", name));
        }
    }

    out.push_str(&result.summary);
    out.push('\n');

    if !content.source.is_empty() && content.source != CLIPBOARD_SOURCE {
        out.push_str(&format!("\n**Source:** {}\n", content.source));
    }

    if content.kind == NoteKind::Link && !content.text.is_empty() {
        out.push_str("\n---\n\n");
        out.push_str("<details>\n<summary>Original content</summary>\n\n");
        out.push_str(&content.text);
        out.push_str("\n\n</details>\n");
    }

    out
}

/// Render what [`write_note`] would write into `dir`, without touching the
/// disk. The stem is resolved against existing files the same way.
pub fn render_preview(
    dir: &Path,
    content: &ContentInput,
    result: &AiResult,
    hash: &str,
) -> String {
    let stem = unique_stem(dir, &slugify(&result.title), image_ext(content));
    let image_name = image_name_for(content, &stem);
    render_markdown(
        content,
        result,
        hash,
        Local::now().into(),
        image_name.as_deref(),
    )
}

fn image_ext(content: &ContentInput) -> Option<&str> {
    (content.kind == NoteKind::Image).then_some(content.extension.as_str())
}

fn image_name_for(content: &ContentInput, stem: &str) -> Option<String> {
    image_ext(content).map(|ext| format!("{}{}", stem, ext))
}

/// First of `path`, `<stem>-2.<ext>`, `<stem>-3.<ext>`, ... that does not
/// exist yet.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    (2u32..)
        .map(|i| parent.join(format!("{}-{}{}", stem, i, ext)))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// First of `slug`, `slug-2`, `slug-3`, ... for which `<stem>.md` is free in
/// `dir` and, when `image_ext` is given, `<stem><image_ext>` is free too.
pub fn unique_stem(dir: &Path, slug: &str, image_ext: Option<&str>) -> String {
    let is_free = |stem: &str| {
        !dir.join(format!("{}.{}", stem, NOTE_EXTENSION)).exists()
            && image_ext.map_or(true, |ext| !dir.join(format!("{}{}", stem, ext)).exists())
    };

    if is_free(slug) {
        return slug.to_string();
    }
    (2u32..)
        .map(|i| format!("{}-{}", slug, i))
        .find(|stem| is_free(stem))
        .unwrap_or_else(|| slug.to_string())
}

/// Create `path` and write `data`; fails if the file already exists. A
/// partially written file is removed.
fn write_new(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Err(e) = file.write_all(data) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e.into());
    }
    Ok(())
}

/// Write the optional image, then the note. If the note cannot be written
/// the image is removed again.
fn store_files(image: Option<(&Path, &[u8])>, md_path: &Path, markdown: &str) -> Result<()> {
    if let Some((image_path, data)) = image {
        write_new(image_path, data)?;
        debug!(image_path = %image_path.display(), bytes = data.len(), "image stored");
    }

    if let Err(e) = write_new(md_path, markdown.as_bytes()) {
        if let Some((image_path, _)) = image {
            if let Err(rm) = fs::remove_file(image_path) {
                warn!(image_path = %image_path.display(), error = %rm, "could not remove orphaned image");
            }
        }
        return Err(e);
    }
    Ok(())
}

/// Persist a new note in `dir` and return the Markdown file's path.
///
/// The directory is created if needed. The stem is chosen so that neither
/// the note nor its image replaces an existing file, and both are opened
/// with `create_new`, so a file appearing after the check fails the write
/// instead of being overwritten. The image is written first and removed
/// again when the note cannot be written.
#[instrument(skip(content, result), fields(subsystem = "vault", component = "writer", op = "write_note", kind = %content.kind))]
pub fn write_note(
    dir: &Path,
    content: &ContentInput,
    result: &AiResult,
    hash: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let stem = unique_stem(dir, &slugify(&result.title), image_ext(content));
    let md_path = dir.join(format!("{}.{}", stem, NOTE_EXTENSION));

    let image_name = image_name_for(content, &stem);
    let image_path = image_name.as_ref().map(|name| dir.join(name));

    let markdown = render_markdown(
        content,
        result,
        hash,
        Local::now().into(),
        image_name.as_deref(),
    );

    store_files(
        image_path.as_deref().map(|p| (p, content.data.as_slice())),
        &md_path,
        &markdown,
    )?;

    debug!(note_path = %md_path.display(), "note written");
    Ok(md_path)
}
