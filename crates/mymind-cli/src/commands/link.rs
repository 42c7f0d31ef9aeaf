use std::io::Write;

use anyhow::Result;
use mymind_vault::{LinkReport, Vault};

pub(crate) fn write_link_summary(report: &LinkReport, out: &mut impl Write) -> Result<()> {
    if report.total == 0 {
        writeln!(out, "no notes found")?;
    } else {
        writeln!(out, "Updated {} of {} notes", report.updated, report.total)?;
    }
    Ok(())
}

/// Rebuild the related section of every note.
pub fn run_link(vault: &Vault, out: &mut impl Write) -> Result<()> {
    let report = vault.link()?;
    for (path, error) in &report.failures {
        eprintln!("warning: could not update {}: {}", path.display(), error);
    }
    write_link_summary(&report, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::write_note;

    #[test]
    fn test_link_reports_updates() {
        let dir = tempfile::tempdir().unwrap();
        write_note(dir.path(), "a.md", "A", "2024-01-01T00:00:00Z", &["rust"], "a");
        write_note(dir.path(), "b.md", "B", "2024-01-02T00:00:00Z", &["rust"], "b");
        write_note(dir.path(), "c.md", "C", "2024-01-03T00:00:00Z", &["bread"], "c");
        let vault = Vault::new(dir.path(), "inbox");

        let mut out = Vec::new();
        run_link(&vault, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Updated 2 of 3 notes\n");

        let mut again = Vec::new();
        run_link(&vault, &mut again).unwrap();
        assert_eq!(String::from_utf8(again).unwrap(), "Updated 0 of 3 notes\n");
    }

    #[test]
    fn test_link_empty_vault() {
        let dir = tempfile::tempdir().unwrap();
        let vault = Vault::new(dir.path(), "inbox");
        let mut out = Vec::new();
        run_link(&vault, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "no notes found\n");
    }
}
