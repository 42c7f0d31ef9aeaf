//! Tag normalization and AI result validation.
//!
//! Tags are stored lowercase and kebab-case. The model is asked for that
//! shape but is not trusted to deliver it, so every tag passes through
//! [`sanitize_tag`] before it reaches a note.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::defaults::{EMPTY_SUMMARY, UNTITLED};
use crate::models::AiResult;

static TAG_INVALID_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]+").expect("valid tag regex"));

/// Normalize a single tag to kebab-case.
///
/// Lowercases, strips one leading `#`, replaces runs of characters outside
/// `[a-z0-9-]` with a hyphen, and trims hyphens from both ends. May return
/// an empty string, which callers drop.
///
/// ```
/// use mymind_core::sanitize_tag;
///
/// assert_eq!(sanitize_tag("#Machine Learning"), "machine-learning");
/// assert_eq!(sanitize_tag("C++"), "c");
/// ```
pub fn sanitize_tag(tag: &str) -> String {
    let lower = tag.to_lowercase();
    let stripped = lower.strip_prefix('#').unwrap_or(&lower);
    TAG_INVALID_RUN
        .replace_all(stripped, "-")
        .trim_matches('-')
        .to_string()
}

/// Sanitize, drop empties, deduplicate, and sort a tag list.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = tags
        .into_iter()
        .map(|t| sanitize_tag(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

impl AiResult {
    /// Apply the persistence rules to a raw model result.
    ///
    /// Empty title becomes `untitled`, empty summary becomes
    /// `(no summary)`, tags are normalized with [`normalize_tags`].
    pub fn validated(self) -> Self {
        let title = if self.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            self.title
        };
        let summary = if self.summary.trim().is_empty() {
            EMPTY_SUMMARY.to_string()
        } else {
            self.summary
        };
        Self {
            title,
            tags: normalize_tags(&self.tags),
            summary,
        }
    }
}
