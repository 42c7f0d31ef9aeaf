//! Filesystem-safe names and image type detection.
//!
//! Note files are named after a slug of their title; images saved next to
//! them take an extension derived from their MIME type.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::defaults::{FALLBACK_SLUG, SLUG_MAX_LEN};

static SLUG_INVALID_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Image extensions recognised in URLs, with their MIME types.
///
/// Order matters for reverse lookups: the first entry for a MIME type wins.
pub const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".png", "image/png"),
    (".gif", "image/gif"),
    (".webp", "image/webp"),
    (".bmp", "image/bmp"),
];

/// Derive a filesystem-safe file stem from a title.
///
/// Lowercase, runs of non-alphanumeric characters collapsed to one hyphen,
/// no leading or trailing hyphen, at most 50 bytes. Falls back to `note`
/// when nothing usable is left.
///
/// ```
/// use mymind_core::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("???"), "note");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let replaced = SLUG_INVALID_RUN.replace_all(&lower, "-");
    let mut slug = replaced.trim_matches('-');
    // Only ASCII survives the replacement, so byte slicing is safe.
    if slug.len() > SLUG_MAX_LEN {
        slug = slug[..SLUG_MAX_LEN].trim_end_matches('-');
    }
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// MIME type for a lowercase image extension such as `.png`.
pub fn image_mime_for_ext(ext: &str) -> Option<&'static str> {
    IMAGE_EXTENSIONS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// File extension (with dot) for an image MIME type; `.png` when unknown.
pub fn ext_from_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => ".png",
        "image/jpeg" => ".jpg",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/bmp" => ".bmp",
        _ => ".png",
    }
}

/// Detect an image MIME type from magic bytes.
///
/// Returns `None` when the data is not a recognisable image.
pub fn detect_image_mime(data: &[u8]) -> Option<String> {
    infer::get(data)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .map(|kind| kind.mime_type().to_string())
}
