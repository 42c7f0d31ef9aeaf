//! Mock analyzer for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mymind_inference::mock::MockAnalyzer;
//! use mymind_core::{AiResult, ContentAnalyzer, ContentInput};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let analyzer = MockAnalyzer::new().with_result(AiResult {
//!     title: "Fixed".to_string(),
//!     tags: vec!["Test Tag".to_string()],
//!     summary: "Always the same.".to_string(),
//! });
//!
//! let result = analyzer.analyze(&ContentInput::note("anything"), None).await.unwrap();
//! assert_eq!(result.tags, vec!["test-tag"]);
//! assert_eq!(analyzer.analyze_call_count(), 1);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mymind_core::{AiResult, ContentAnalyzer, ContentInput, Error, RecapGenerator, Result};

/// Mock analyzer and recap generator.
#[derive(Clone)]
pub struct MockAnalyzer {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_result: AiResult,
    /// Results keyed by a substring of the input text or source.
    mapped_results: HashMap<String, AiResult>,
    /// Inputs containing any of these substrings fail.
    fail_on: Vec<String>,
    recap: String,
    latency_ms: u64,
}

/// One recorded call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
    pub custom_prompt: Option<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_result: AiResult {
                title: "Mock note".to_string(),
                tags: vec!["mock".to_string()],
                summary: "Mock summary.".to_string(),
            },
            mapped_results: HashMap::new(),
            fail_on: Vec::new(),
            recap: "## Mock recap".to_string(),
            latency_ms: 0,
        }
    }
}

impl MockAnalyzer {
    /// Create a new mock with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the result returned for unmapped inputs.
    pub fn with_result(mut self, result: AiResult) -> Self {
        Arc::make_mut(&mut self.config).default_result = result;
        self
    }

    /// Return `result` for inputs whose text or source contains `needle`.
    pub fn with_result_for(mut self, needle: impl Into<String>, result: AiResult) -> Self {
        Arc::make_mut(&mut self.config)
            .mapped_results
            .insert(needle.into(), result);
        self
    }

    /// Fail inputs whose text or source contains `needle`.
    pub fn with_failure_on(mut self, needle: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).fail_on.push(needle.into());
        self
    }

    /// Set the text returned by recap generation.
    pub fn with_recap(mut self, recap: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).recap = recap.into();
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.lock_log().clone()
    }

    /// Get number of analyze calls.
    pub fn analyze_call_count(&self) -> usize {
        self.count("analyze")
    }

    /// Get number of recap calls.
    pub fn recap_call_count(&self) -> usize {
        self.count("recap")
    }

    fn count(&self, operation: &str) -> usize {
        self.lock_log()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn lock_log(&self) -> std::sync::MutexGuard<'_, Vec<MockCall>> {
        // A poisoned log only means another test thread panicked.
        self.call_log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn log_call(&self, operation: &str, input: &str, custom_prompt: Option<&str>) {
        self.lock_log().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
            custom_prompt: custom_prompt.map(str::to_string),
        });
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(content: &ContentInput) -> String {
    if content.text.is_empty() {
        content.source.clone()
    } else {
        format!("{} {}", content.source, content.text)
    }
}

#[async_trait]
impl ContentAnalyzer for MockAnalyzer {
    async fn analyze(&self, content: &ContentInput, custom_prompt: Option<&str>) -> Result<AiResult> {
        let input = describe(content);
        self.log_call("analyze", &input, custom_prompt);
        self.simulate_latency().await;

        if self.config.fail_on.iter().any(|n| input.contains(n.as_str())) {
            return Err(Error::Inference("Simulated failure".to_string()));
        }

        let result = self
            .config
            .mapped_results
            .iter()
            .find(|(needle, _)| input.contains(needle.as_str()))
            .map(|(_, r)| r.clone())
            .unwrap_or_else(|| self.config.default_result.clone());

        Ok(result.validated())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl RecapGenerator for MockAnalyzer {
    async fn generate_recap(&self, notes_text: &str, _period: &str) -> Result<String> {
        self.log_call("recap", notes_text, None);
        self.simulate_latency().await;
        Ok(self.config.recap.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_result_is_validated() {
        let analyzer = MockAnalyzer::new().with_result(AiResult {
            title: String::new(),
            tags: vec!["B".to_string(), "#a".to_string(), "b".to_string()],
            summary: String::new(),
        });
        let result = analyzer.analyze(&ContentInput::note("x"), None).await.unwrap();
        assert_eq!(result.title, "untitled");
        assert_eq!(result.tags, vec!["a", "b"]);
        assert_eq!(result.summary, "(no summary)");
    }

    #[tokio::test]
    async fn test_mock_mapping_and_failure() {
        let analyzer = MockAnalyzer::new()
            .with_result_for(
                "rust",
                AiResult {
                    title: "Rust".to_string(),
                    tags: vec!["rust".to_string()],
                    summary: "s".to_string(),
                },
            )
            .with_failure_on("boom");

        let result = analyzer
            .analyze(&ContentInput::link("https://rust-lang.org", ""), Some("terse"))
            .await
            .unwrap();
        assert_eq!(result.title, "Rust");

        assert!(analyzer.analyze(&ContentInput::note("boom"), None).await.is_err());
        assert_eq!(analyzer.analyze_call_count(), 2);
        assert_eq!(analyzer.get_calls()[0].custom_prompt.as_deref(), Some("terse"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_recap_with_latency() {
        let analyzer = MockAnalyzer::new().with_recap("# Week").with_latency_ms(50);
        assert_eq!(analyzer.generate_recap("digest", "7d").await.unwrap(), "# Week");
        assert_eq!(analyzer.recap_call_count(), 1);
        assert_eq!(analyzer.analyze_call_count(), 0);
    }
}
