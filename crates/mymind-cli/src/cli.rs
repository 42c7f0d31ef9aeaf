//! Command-line grammar.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use mymind_core::defaults::{
    ENV_FOLDER, ENV_MODEL, ENV_PROMPT, ENV_VAULT, GEN_MODEL, LIST_LIMIT, NOTE_FOLDER,
    RECAP_PERIOD, SEARCH_LIMIT,
};

/// Save links, notes, images, and PDFs as AI-tagged Markdown notes.
///
/// Without a subcommand the arguments are joined into one input and saved:
/// a URL (web page, tweet, or image), a path to a PDF, `clipboard` for an
/// image on the clipboard, `-` to read a note from stdin, or plain text.
#[derive(Parser, Debug)]
#[command(name = "mymind")]
#[command(author, version)]
#[command(propagate_version = true, args_conflicts_with_subcommands = true)]
#[command(after_help = "Environment:\n  \
    GEMINI_API_KEY   API key for Google Gemini (required for save, batch, recap, scan)\n  \
    MYMIND_VAULT     Path to notes vault\n  \
    MYMIND_FOLDER    Subfolder for new notes\n  \
    MYMIND_MODEL     Gemini model\n  \
    MYMIND_PROMPT    Custom AI prompt instructions")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input to save
    #[arg(trailing_var_arg = true)]
    pub input: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to the notes vault
    #[arg(long, env = ENV_VAULT, global = true)]
    pub vault: Option<PathBuf>,

    /// Subfolder within the vault for new notes
    #[arg(long, env = ENV_FOLDER, default_value = NOTE_FOLDER, global = true)]
    pub folder: String,

    /// Gemini model
    #[arg(long, env = ENV_MODEL, default_value = GEN_MODEL, global = true)]
    pub model: String,

    /// Custom instructions for AI analysis
    #[arg(long, env = ENV_PROMPT, global = true)]
    pub prompt: Option<String>,

    /// Print markdown to stdout instead of writing a file
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Analyze and save an input
    Save {
        #[arg(required = true, trailing_var_arg = true)]
        input: Vec<String>,
    },

    /// Search saved notes (#tag for tag search)
    Search {
        /// Maximum number of results
        #[arg(short = 'n', long = "limit", default_value_t = SEARCH_LIMIT)]
        limit: usize,

        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// List recent notes
    List {
        /// Number of notes to show
        #[arg(short = 'n', long = "limit", default_value_t = LIST_LIMIT)]
        limit: usize,

        /// Show all notes
        #[arg(long)]
        all: bool,
    },

    /// Open the vault in the file manager
    Open,

    /// Process inputs from a file, one per line
    Batch {
        file: PathBuf,
    },

    /// Summarize recent notes into a recap note
    Recap {
        /// Time period to summarize (e.g. 7d, 2w, 24h)
        #[arg(long, default_value = RECAP_PERIOD)]
        period: String,
    },

    /// Update related links between all notes
    Link,

    /// Generate tags for existing Markdown files in the vault
    Scan {
        /// Reprocess files that already have tags
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// The command to run; bare inputs mean `save`.
    pub fn resolved_command(&self) -> Option<Command> {
        match &self.command {
            Some(command) => Some(command.clone()),
            None if !self.input.is_empty() => Some(Command::Save {
                input: self.input.clone(),
            }),
            None => None,
        }
    }
}
