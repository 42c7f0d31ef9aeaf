use std::io::Write;

use anyhow::Result;
use mymind_vault::Vault;
use tokio::process::Command;

const OPENER: &str = "xdg-open";

/// Open the vault root in the desktop file manager. Does not wait for it.
pub fn run_open(vault: &Vault, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Opening {}...", vault.root().display())?;
    if let Err(e) = Command::new(OPENER).arg(vault.root()).spawn() {
        eprintln!("error: could not run {}: {}", OPENER, e);
    }
    Ok(())
}
