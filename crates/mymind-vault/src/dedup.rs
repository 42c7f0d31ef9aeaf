//! Deduplication index over the loaded corpus.
//!
//! The content fingerprint ([`ContentInput::fingerprint`]) is computed
//! before any AI call; a hit here skips the whole save pipeline.
//!
//! [`ContentInput::fingerprint`]: mymind_core::ContentInput::fingerprint

use mymind_core::Note;

/// First note in corpus order whose `source_hash` equals `hash`.
///
/// The corpus is ordered most recent first, so the most recent matching
/// note wins. An empty hash never matches.
pub fn find_duplicate<'a>(notes: &'a [Note], hash: &str) -> Option<&'a Note> {
    if hash.is_empty() {
        return None;
    }
    notes.iter().find(|note| note.source_hash == hash)
}
