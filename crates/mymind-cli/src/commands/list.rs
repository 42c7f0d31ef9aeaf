use std::io::Write;

use anyhow::Result;
use mymind_core::Note;
use mymind_vault::Vault;

use super::format_date;

/// One listing line: `YYYY-MM-DD  [kind]  title  [tags]`.
pub fn format_list_line(note: &Note) -> String {
    let tags = if note.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", note.tags.join(", "))
    };
    format!("{}  [{}]  {}{}", format_date(note), note.kind, note.title, tags)
}

/// Print the most recent notes.
pub fn run_list(vault: &Vault, limit: usize, all: bool, out: &mut impl Write) -> Result<()> {
    let notes = vault.load_notes()?;
    if notes.is_empty() {
        writeln!(out, "no notes found in {}", vault.root().display())?;
        return Ok(());
    }

    let total = notes.len();
    let shown = if all { total } else { limit.min(total) };
    for note in &notes[..shown] {
        writeln!(out, "{}", format_list_line(note))?;
    }
    writeln!(out, "\nShowing {} of {} notes", shown, total)?;
    Ok(())
}
