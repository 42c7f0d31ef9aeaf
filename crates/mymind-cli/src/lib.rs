//! # mymind-cli
//!
//! The `mymind` binary: argument parsing, settings, logging, the save
//! pipeline, and one module per subcommand.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod pipeline;

pub use cli::{Cli, Command, GlobalArgs};
pub use config::Settings;
pub use pipeline::{process_input, save_content, SaveOutcome};
