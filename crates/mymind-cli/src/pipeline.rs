//! The save pipeline: resolve, deduplicate, analyze, write, relink.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use mymind_core::{ContentAnalyzer, ContentInput, Result};
use mymind_extract::Extractor;
use mymind_vault::writer::render_preview;
use mymind_vault::{find_duplicate, LinkReport, Vault};

/// What happened to one input.
#[derive(Debug)]
pub enum SaveOutcome {
    /// Written to disk; `link` describes the related-notes cascade.
    Saved { path: PathBuf, link: LinkReport },
    /// An existing note already has this fingerprint.
    Duplicate(PathBuf),
    /// Dry run: the markdown that would have been written.
    Preview(String),
}

/// Save resolved content.
///
/// The duplicate check runs before the model is called. Dry runs render the
/// note and touch nothing. A failed cascade is logged; the note stays saved.
#[instrument(skip_all, fields(subsystem = "cli", component = "pipeline", op = "save", kind = %content.kind, dry_run = dry_run))]
pub async fn save_content(
    vault: &Vault,
    analyzer: &dyn ContentAnalyzer,
    custom_prompt: Option<&str>,
    content: &ContentInput,
    dry_run: bool,
) -> Result<SaveOutcome> {
    let notes = vault.load_notes()?;
    let hash = content.fingerprint();
    if let Some(dup) = find_duplicate(&notes, &hash) {
        info!(note_path = %dup.path.display(), "duplicate input");
        return Ok(SaveOutcome::Duplicate(dup.path.clone()));
    }

    info!(model = analyzer.model_name(), "Analyzing with AI");
    let result = analyzer.analyze(content, custom_prompt).await?;

    if dry_run {
        return Ok(SaveOutcome::Preview(render_preview(vault.note_dir(), content, &result, &hash)));
    }

    let path = vault.write_note(content, &result, &hash)?;
    let link = match vault.cascade_after_save(&path) {
        Ok(report) => report,
        Err(e) => {
            warn!(note_path = %path.display(), error = %e, "related-notes update failed");
            LinkReport::default()
        }
    };
    Ok(SaveOutcome::Saved { path, link })
}

/// Resolve a raw input and save it.
pub async fn process_input(
    extractor: &Extractor,
    vault: &Vault,
    analyzer: &dyn ContentAnalyzer,
    custom_prompt: Option<&str>,
    input: &str,
    dry_run: bool,
) -> Result<SaveOutcome> {
    let content = extractor.resolve(input).await?;
    save_content(vault, analyzer, custom_prompt, &content, dry_run).await
}
