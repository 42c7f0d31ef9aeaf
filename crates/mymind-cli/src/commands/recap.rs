use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use mymind_core::RecapGenerator;
use mymind_vault::recap::{build_digest, notes_since, parse_period, render_recap, write_recap};

use crate::config::Settings;

/// Summarize notes created within `period` before `now`.
///
/// Returns the recap path, or `None` when nothing was written (no notes in
/// range, or a dry run).
pub async fn run_recap(
    settings: &Settings,
    generator: &dyn RecapGenerator,
    period: &str,
    now: DateTime<FixedOffset>,
    out: &mut impl Write,
) -> Result<Option<PathBuf>> {
    let duration = parse_period(period)?;
    let notes = settings.vault.load_notes()?;
    let recent = notes_since(&notes, duration, now);
    if recent.is_empty() {
        eprintln!("No notes found in the last {}.", period);
        return Ok(None);
    }

    let digest = build_digest(&recent);
    writeln!(
        out,
        "Generating recap for {} notes from the last {}...",
        recent.len(),
        period
    )?;
    let recap = generator.generate_recap(&digest, period).await?;

    if settings.dry_run {
        write!(out, "{}", render_recap(period, &recap, now))?;
        return Ok(None);
    }

    let path = write_recap(settings.vault.root(), period, &recap, now)?;
    writeln!(out, "Saved recap to {}", path.display())?;
    Ok(Some(path))
}
