use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use mymind_core::ContentAnalyzer;
use mymind_extract::Extractor;
use tracing::{info, warn};

use crate::config::Settings;
use crate::pipeline::{process_input, SaveOutcome};

/// Totals for a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub errors: usize,
}

/// Inputs in a batch file: trimmed lines, blanks and `#` comments dropped.
pub fn batch_inputs(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Run every input in `file` through the save pipeline, one at a time.
/// A failing input is logged and counted; the batch carries on.
pub async fn run_batch(
    settings: &Settings,
    extractor: &Extractor,
    analyzer: &dyn ContentAnalyzer,
    file: &Path,
    out: &mut impl Write,
) -> Result<BatchSummary> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("could not read batch file {}", file.display()))?;

    let mut summary = BatchSummary::default();
    for input in batch_inputs(&contents) {
        summary.total += 1;
        writeln!(out, "Processing: {}...", input)?;

        let result = process_input(
            extractor,
            &settings.vault,
            analyzer,
            settings.custom_prompt(),
            input,
            settings.dry_run,
        )
        .await;

        match result {
            Ok(SaveOutcome::Saved { path, .. }) => writeln!(out, "  Saved to {}", path.display())?,
            Ok(SaveOutcome::Duplicate(path)) => {
                eprintln!("  skipping duplicate: {}", path.display())
            }
            Ok(SaveOutcome::Preview(markdown)) => write!(out, "{}", markdown)?,
            Err(e) => {
                warn!(input = %input, error = %e, "batch input failed");
                summary.errors += 1;
            }
        }
    }

    info!(total = summary.total, errors = summary.errors, "batch complete");
    writeln!(
        out,
        "Processed {} inputs ({} errors)",
        summary.total, summary.errors
    )?;
    Ok(summary)
}
