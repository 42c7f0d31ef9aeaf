use std::io::Write;

use anyhow::{Context, Result};
use mymind_core::ContentAnalyzer;
use mymind_extract::Extractor;

use crate::config::Settings;
use crate::pipeline::{process_input, SaveOutcome};

/// Save one input and report where it went.
pub async fn run_save(
    settings: &Settings,
    extractor: &Extractor,
    analyzer: &dyn ContentAnalyzer,
    input: &str,
    out: &mut impl Write,
) -> Result<()> {
    let outcome = process_input(
        extractor,
        &settings.vault,
        analyzer,
        settings.custom_prompt(),
        input,
        settings.dry_run,
    )
    .await
    .context("could not save input")?;

    match outcome {
        SaveOutcome::Saved { path, .. } => writeln!(out, "Saved to {}", path.display())?,
        SaveOutcome::Duplicate(path) => {
            eprintln!("duplicate: already saved as {}", path.display())
        }
        SaveOutcome::Preview(markdown) => write!(out, "{}", markdown)?,
    }
    Ok(())
}
