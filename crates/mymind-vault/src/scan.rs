//! Frontmatter regeneration for existing Markdown files.
//!
//! `scan` walks the whole vault and asks the analyzer to tag files that
//! have no frontmatter yet, or frontmatter without tags. With `force`,
//! already tagged notes are re-analyzed too. Per-file failures are counted
//! and the scan moves on.

use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, FixedOffset, Local};
use mymind_core::frontmatter::Frontmatter;
use mymind_core::{AiResult, ContentAnalyzer, ContentInput, NoteKind, Result};
use tracing::{debug, info, instrument, warn};

use crate::corpus::list_markdown_files;
use crate::related::{link_vault, LinkReport};

/// Outcome of a scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Markdown files found.
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Link pass run after the scan, when at least one file was processed.
    pub link: Option<LinkReport>,
}

enum FileOutcome {
    Processed,
    Skipped,
}

/// Regenerate frontmatter across the vault, then relink if anything changed.
#[instrument(skip(analyzer, custom_prompt), fields(subsystem = "vault", component = "scan", op = "scan_vault", model = analyzer.model_name()))]
pub async fn scan_vault(
    root: &Path,
    analyzer: &dyn ContentAnalyzer,
    custom_prompt: Option<&str>,
    force: bool,
) -> Result<ScanReport> {
    let start = Instant::now();
    let files = list_markdown_files(root)?;
    let mut report = ScanReport {
        total: files.len(),
        ..Default::default()
    };

    for path in &files {
        match scan_file(path, analyzer, custom_prompt, force).await {
            Ok(FileOutcome::Processed) => report.processed += 1,
            Ok(FileOutcome::Skipped) => report.skipped += 1,
            Err(e) => {
                warn!(note_path = %path.display(), error = %e, "scan: file failed");
                report.errors += 1;
            }
        }
    }

    info!(
        total = report.total,
        processed = report.processed,
        skipped = report.skipped,
        errors = report.errors,
        duration_ms = start.elapsed().as_millis() as u64,
        "scan complete"
    );

    if report.processed > 0 {
        report.link = Some(link_vault(root)?);
    }
    Ok(report)
}

async fn scan_file(
    path: &Path,
    analyzer: &dyn ContentAnalyzer,
    custom_prompt: Option<&str>,
    force: bool,
) -> Result<FileOutcome> {
    let content = fs::read_to_string(path)?;
    let existing = Frontmatter::split(&content);

    if let Some((fm, _)) = &existing {
        if !fm.tags.is_empty() && !force {
            return Ok(FileOutcome::Skipped);
        }
    }

    let text = match &existing {
        Some((_, body)) => body.trim(),
        None => content.trim(),
    };
    if text.is_empty() {
        return Ok(FileOutcome::Skipped);
    }

    info!(note_path = %path.display(), "scan: analyzing");
    let input = ContentInput::note(text);
    let result = analyzer.analyze(&input, custom_prompt).await?;
    let hash = input.fingerprint();
    let now: DateTime<FixedOffset> = Local::now().into();

    let updated = match existing {
        Some((old, body)) => regenerate_frontmatter(&old, body, &result, &hash, now),
        None => add_frontmatter(text, &result, &hash, now),
    };
    fs::write(path, updated)?;

    debug!(note_path = %path.display(), tags = result.tags.len(), "scan: frontmatter written");
    Ok(FileOutcome::Processed)
}

/// Rebuild the block of an existing note, keeping its body verbatim.
///
/// `created`, `kind`, `source`, and `source_hash` are kept (a missing
/// `created` becomes `now`, a missing hash becomes `hash`). The old title
/// survives when the model gave up on one.
pub fn regenerate_frontmatter(
    old: &Frontmatter,
    body: &str,
    result: &AiResult,
    hash: &str,
    now: DateTime<FixedOffset>,
) -> String {
    let title = if result.title == mymind_core::defaults::UNTITLED && !old.title.is_empty() {
        old.title.clone()
    } else {
        result.title.clone()
    };

    let fm = Frontmatter {
        title,
        created: Some(old.created.unwrap_or(now)),
        kind: old.kind,
        source: old.source.clone(),
        source_hash: if old.source_hash.is_empty() {
            hash.to_string()
        } else {
            old.source_hash.clone()
        },
        tags: result.tags.clone(),
    };

    let mut out = fm.render();
    out.push_str(body);
    out
}

/// Prepend a fresh `note` block to a file that had none.
pub fn add_frontmatter(
    body: &str,
    result: &AiResult,
    hash: &str,
    now: DateTime<FixedOffset>,
) -> String {
    let fm = Frontmatter {
        title: result.title.clone(),
        created: Some(now),
        kind: NoteKind::Note,
        source: String::new(),
        source_hash: hash.to_string(),
        tags: result.tags.clone(),
    };

    let mut out = fm.render();
    out.push('\n');
    out.push_str(body);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-02-02T08:00:00Z").unwrap()
    }

    fn result(title: &str) -> AiResult {
        AiResult {
            title: title.to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            summary: "s".to_string(),
        }
    }

    #[test]
    fn test_add_frontmatter_layout() {
        let out = add_frontmatter("hello world", &result("Hello"), "h", now());
        assert_eq!(
            out,
            "---\ntitle: \"Hello\"\ncreated: \"2024-02-02T08:00:00Z\"\nkind: note\nsource_hash: \"h\"\ntags:\n  - a\n  - b\n---\n\nhello world\n"
        );
    }

    #[test]
    fn test_regenerate_keeps_created_kind_source_and_body() {
        let content = "---\ntitle: \"Old\"\ncreated: \"2020-01-01T00:00:00Z\"\nkind: link\nsource: \"https://x.test\"\ntags:\n---\n\n# Old\n\nBody.\n";
        let (old, body) = Frontmatter::split(content).unwrap();
        let out = regenerate_frontmatter(&old, body, &result("New"), "h", now());

        let (fm, new_body) = Frontmatter::split(&out).unwrap();
        assert_eq!(fm.title, "New");
        assert_eq!(fm.created, old.created);
        assert_eq!(fm.kind, NoteKind::Link);
        assert_eq!(fm.source, "https://x.test");
        assert_eq!(fm.source_hash, "h");
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert_eq!(new_body, "\n# Old\n\nBody.\n");
    }

    #[test]
    fn test_regenerate_keeps_existing_source_hash() {
        let content = "---\ntitle: \"Go\"\nkind: link\nsource: \"https://go.dev\"\nsource_hash: \"url-hash\"\ntags:\n  - go\n---\n\n# Go\n";
        let (old, body) = Frontmatter::split(content).unwrap();
        let out = regenerate_frontmatter(&old, body, &result("Go"), "body-hash", now());
        let fm = Frontmatter::parse(&out).unwrap();
        assert_eq!(fm.source_hash, "url-hash");
    }

    #[test]
    fn test_regenerate_keeps_old_title_over_untitled() {
        let (old, body) = Frontmatter::split("---\ntitle: \"Mine\"\n---\ntext\n").unwrap();
        let out = regenerate_frontmatter(&old, body, &result("untitled"), "h", now());
        let fm = Frontmatter::parse(&out).unwrap();
        assert_eq!(fm.title, "Mine");
        assert_eq!(fm.created, Some(now()));
    }
}
