use std::io::Write;

use anyhow::Result;
use mymind_core::ContentAnalyzer;
use mymind_vault::scan::{scan_vault, ScanReport};

use super::link::write_link_summary;
use crate::config::Settings;

pub fn write_scan_summary(report: &ScanReport, out: &mut impl Write) -> Result<()> {
    if report.total == 0 {
        writeln!(out, "no markdown files found")?;
        return Ok(());
    }
    writeln!(
        out,
        "Done: {} processed, {} skipped, {} errors (of {} files)",
        report.processed, report.skipped, report.errors, report.total
    )?;
    if let Some(link) = &report.link {
        write_link_summary(link, out)?;
    }
    Ok(())
}

/// Tag untagged Markdown files across the vault, then relink.
pub async fn run_scan(
    settings: &Settings,
    analyzer: &dyn ContentAnalyzer,
    force: bool,
    out: &mut impl Write,
) -> Result<ScanReport> {
    let root = settings.vault.root();
    writeln!(out, "Scanning {}...", root.display())?;
    let report = scan_vault(root, analyzer, settings.custom_prompt(), force).await?;
    write_scan_summary(&report, out)?;
    Ok(report)
}
