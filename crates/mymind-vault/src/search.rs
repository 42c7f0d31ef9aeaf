//! Token search over the corpus.
//!
//! A query is split on whitespace. Tokens starting with `#` are tag tokens,
//! everything else is a text token. A note matches when it carries every
//! tag token and every text token appears in its title or body summary.

use std::collections::HashMap;

use mymind_core::{Note, Result};
use tracing::{debug, instrument, trace};

use crate::corpus::load_summary;

/// Parsed search query. All tokens are lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub tags: Vec<String>,
    pub text: Vec<String>,
}

impl SearchQuery {
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for token in query.split_whitespace() {
            let token = token.to_lowercase();
            match token.strip_prefix('#') {
                Some(tag) => parsed.tags.push(tag.to_string()),
                None => parsed.text.push(token),
            }
        }
        parsed
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.text.is_empty()
    }
}

/// Search the corpus, loading summaries from disk.
pub fn search<'a>(notes: &'a [Note], query: &SearchQuery, limit: usize) -> Vec<&'a Note> {
    search_with(notes, query, limit, load_summary)
}

/// Search with a custom summary loader.
///
/// The loader runs at most once per note, and only when a text token is not
/// found in the title. A loader failure counts as an empty summary. Stops
/// as soon as `limit` matches are collected.
#[instrument(skip_all, fields(subsystem = "vault", component = "search", op = "search", limit = limit))]
pub fn search_with<'a, F>(
    notes: &'a [Note],
    query: &SearchQuery,
    limit: usize,
    mut load: F,
) -> Vec<&'a Note>
where
    F: FnMut(&Note) -> Result<String>,
{
    let mut matches = Vec::new();
    if limit == 0 {
        return matches;
    }

    let mut summaries: HashMap<usize, String> = HashMap::new();

    for (idx, note) in notes.iter().enumerate() {
        if !query.tags.iter().all(|tag| note.has_tag(tag)) {
            continue;
        }

        let title = note.title.to_lowercase();
        let text_ok = query.text.iter().all(|token| {
            if title.contains(token.as_str()) {
                return true;
            }
            let summary = summaries.entry(idx).or_insert_with(|| match load(note) {
                Ok(summary) => summary.to_lowercase(),
                Err(e) => {
                    trace!(note_path = %note.path.display(), error = %e, "search: summary unavailable");
                    String::new()
                }
            });
            summary.contains(token.as_str())
        });

        if text_ok {
            matches.push(note);
            if matches.len() >= limit {
                break;
            }
        }
    }

    debug!(
        result_count = matches.len(),
        summaries_loaded = summaries.len(),
        "search complete"
    );
    matches
}
