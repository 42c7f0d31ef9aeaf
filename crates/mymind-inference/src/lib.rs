//! # mymind-inference
//!
//! Generative-AI collaborators for mymind.
//!
//! This crate provides:
//! - Gemini REST backend implementing [`ContentAnalyzer`] and [`RecapGenerator`]
//! - Analysis and recap prompt construction
//! - Tolerant parsing of model output into an [`AiResult`]
//! - Mock analyzer for tests (feature `mock`)
//!
//! # Feature Flags
//!
//! - `mock`: Enable [`mock::MockAnalyzer`] for dependent crates' tests

pub mod gemini;
pub mod prompt;
pub mod response;

// Mock backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use mymind_core::{AiResult, ContentAnalyzer, ContentInput, RecapGenerator};

pub use gemini::{GeminiBackend, GeminiConfig};
pub use prompt::{build_analysis_prompt, build_recap_prompt};
pub use response::{merge_results, parse_ai_result};
