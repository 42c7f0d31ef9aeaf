use std::io::Write;

use anyhow::{bail, Result};
use mymind_core::Note;
use mymind_vault::{search::search, SearchQuery, Vault};

use super::format_date;

/// One result line: date, padded title, tags, path.
pub fn format_search_line(note: &Note) -> String {
    format!(
        "{:<12} {:<40} [{}]  {}",
        format_date(note),
        note.title,
        note.tags.join(", "),
        note.path.display()
    )
}

/// Search the vault and print matches.
pub fn run_search(vault: &Vault, query: &[String], limit: usize, out: &mut impl Write) -> Result<()> {
    let query = SearchQuery::parse(&query.join(" "));
    if query.is_empty() {
        bail!("usage: mymind search [-n max] <query>");
    }

    let notes = vault.load_notes()?;
    let matches = search(&notes, &query, limit);
    if matches.is_empty() {
        writeln!(out, "no matching notes found")?;
        return Ok(());
    }
    for note in matches {
        writeln!(out, "{}", format_search_line(note))?;
    }
    Ok(())
}
