//! Collaborator traits for the generative-AI side of the pipeline.
//!
//! The vault code never talks to a model directly; commands hand it an
//! implementation of these traits (the Gemini backend in production, a mock
//! in tests).

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AiResult, ContentInput};

/// Backend that turns captured content into a title, tags, and summary.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Analyze content, optionally steered by user instructions.
    ///
    /// Implementations return an already validated result
    /// (see [`AiResult::validated`]).
    async fn analyze(&self, content: &ContentInput, custom_prompt: Option<&str>)
        -> Result<AiResult>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

/// Backend that writes a Markdown recap over a digest of recent notes.
#[async_trait]
pub trait RecapGenerator: Send + Sync {
    /// Summarize `notes_text`, which covers the given period (e.g. `7d`).
    async fn generate_recap(&self, notes_text: &str, period: &str) -> Result<String>;
}
