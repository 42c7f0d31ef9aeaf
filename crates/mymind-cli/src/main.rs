//! mymind: save links, notes, images, and PDFs as AI-tagged Markdown notes.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::debug;

use mymind_cli::commands::{batch, link, list, open, recap, save, scan, search};
use mymind_cli::{Cli, Command, Settings};
use mymind_extract::{Extractor, FetchConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = mymind_cli::logging::init_tracing();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let Some(command) = cli.resolved_command() else {
        Cli::command().print_help()?;
        return Ok(ExitCode::FAILURE);
    };

    let settings = Settings::from_args(&cli.global)?;
    debug!(vault = %settings.vault.root().display(), model = %settings.model, "settings resolved");
    let mut out = std::io::stdout();

    match command {
        Command::Save { input } => {
            let analyzer = settings.analyzer()?;
            let extractor = Extractor::new(FetchConfig::default())?;
            save::run_save(&settings, &extractor, &analyzer, &input.join(" "), &mut out).await?;
        }
        Command::Search { limit, query } => {
            search::run_search(&settings.vault, &query, limit, &mut out)?;
        }
        Command::List { limit, all } => {
            list::run_list(&settings.vault, limit, all, &mut out)?;
        }
        Command::Open => {
            open::run_open(&settings.vault, &mut out)?;
        }
        Command::Batch { file } => {
            let analyzer = settings.analyzer()?;
            let extractor = Extractor::new(FetchConfig::default())?;
            batch::run_batch(&settings, &extractor, &analyzer, &file, &mut out).await?;
        }
        Command::Recap { period } => {
            let generator = settings.analyzer()?;
            let now = chrono::Local::now().fixed_offset();
            recap::run_recap(&settings, &generator, &period, now, &mut out).await?;
        }
        Command::Link => {
            link::run_link(&settings.vault, &mut out)?;
        }
        Command::Scan { force } => {
            let analyzer = settings.analyzer()?;
            scan::run_scan(&settings, &analyzer, force, &mut out).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
