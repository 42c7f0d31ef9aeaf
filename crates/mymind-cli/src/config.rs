//! Runtime settings resolved from flags and environment.

use anyhow::{anyhow, Result};

use mymind_inference::GeminiBackend;
use mymind_vault::Vault;

use crate::cli::GlobalArgs;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub vault: Vault,
    pub model: String,
    /// Extra analysis instructions; `None` when unset or blank.
    pub custom_prompt: Option<String>,
    pub dry_run: bool,
}

impl Settings {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let root = args
            .vault
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| anyhow!("vault path is required. Set MYMIND_VAULT or use --vault"))?;

        let folder = if args.folder.trim().is_empty() {
            mymind_core::defaults::NOTE_FOLDER
        } else {
            args.folder.trim()
        };

        Ok(Self {
            vault: Vault::new(root, folder),
            model: args.model.clone(),
            custom_prompt: args
                .prompt
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            dry_run: args.dry_run,
        })
    }

    pub fn custom_prompt(&self) -> Option<&str> {
        self.custom_prompt.as_deref()
    }

    /// Gemini client for commands that call the model. Fails without an API key.
    pub fn analyzer(&self) -> Result<GeminiBackend> {
        Ok(GeminiBackend::from_env(Some(self.model.clone()))?)
    }
}
