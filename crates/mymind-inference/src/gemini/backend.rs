//! Gemini REST backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use tracing::{debug, info, instrument};

use mymind_core::defaults::{
    ENV_GEMINI_API_KEY, ENV_GEMINI_BASE_URL, ENV_GEN_TIMEOUT_SECS, GEMINI_URL, GEN_MODEL,
    GEN_TEMPERATURE, GEN_TIMEOUT_SECS,
};
use mymind_core::{AiResult, ContentAnalyzer, ContentInput, Error, NoteKind, RecapGenerator, Result};

use super::error::{to_mymind_error, GeminiErrorCode};
use super::types::*;
use crate::prompt::{build_analysis_prompt, build_recap_prompt};
use crate::response::parse_ai_result;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, without the version path.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: GEMINI_URL.to_string(),
            api_key: String::new(),
            model: GEN_MODEL.to_string(),
            timeout_seconds: GEN_TIMEOUT_SECS,
            temperature: GEN_TEMPERATURE,
        }
    }
}

impl GeminiConfig {
    /// Read configuration from the environment.
    ///
    /// The API key is required; `model` overrides the default model.
    pub fn from_env(model: Option<String>) -> Result<Self> {
        let api_key = std::env::var(ENV_GEMINI_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(format!("{} environment variable is not set", ENV_GEMINI_API_KEY))
            })?;

        Ok(Self {
            base_url: std::env::var(ENV_GEMINI_BASE_URL).unwrap_or_else(|_| GEMINI_URL.to_string()),
            api_key,
            model: model
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GEN_MODEL.to_string()),
            timeout_seconds: std::env::var(ENV_GEN_TIMEOUT_SECS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(GEN_TIMEOUT_SECS),
            temperature: GEN_TEMPERATURE,
        })
    }
}

/// Gemini backend for content analysis and recaps.
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    /// Create a new Gemini backend with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing Gemini backend: url={}, model={}",
            config.base_url, config.model
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env(model: Option<String>) -> Result<Self> {
        Self::new(GeminiConfig::from_env(model)?)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send one `generateContent` call and return the response text.
    async fn generate(&self, parts: Vec<Part>, json_output: bool) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                response_mime_type: json_output.then(|| "application/json".to_string()),
            },
        };

        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map(|r| r.error.message)
                .unwrap_or(body);
            let code = GeminiErrorCode::from_response(status.as_u16(), &message);
            return Err(to_mymind_error(
                code,
                &format!("Gemini returned {}: {}", status, message),
            ));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let text = result.text();
        debug!(
            model = %self.config.model,
            response_len = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "generation complete"
        );

        if text.trim().is_empty() {
            let reason = result
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(Error::Inference(format!("Empty response from model ({})", reason)));
        }
        Ok(text)
    }
}

/// Request parts for `content`: binary payload first, then the prompt.
pub fn build_parts(content: &ContentInput, prompt: String) -> Vec<Part> {
    let mut parts = Vec::with_capacity(2);
    if matches!(content.kind, NoteKind::Image | NoteKind::Pdf) && !content.data.is_empty() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&content.data);
        parts.push(Part::inline(content.mime_type.clone(), encoded));
    }
    parts.push(Part::text(prompt));
    parts
}

#[async_trait]
impl ContentAnalyzer for GeminiBackend {
    #[instrument(skip(self, content, custom_prompt), fields(subsystem = "inference", component = "gemini", op = "analyze", model = %self.config.model, kind = %content.kind))]
    async fn analyze(&self, content: &ContentInput, custom_prompt: Option<&str>) -> Result<AiResult> {
        let prompt = build_analysis_prompt(content, custom_prompt);
        let text = self.generate(build_parts(content, prompt), true).await?;
        Ok(parse_ai_result(&text)?.validated())
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl RecapGenerator for GeminiBackend {
    #[instrument(skip(self, notes_text), fields(subsystem = "inference", component = "gemini", op = "recap", model = %self.config.model, digest_len = notes_text.len()))]
    async fn generate_recap(&self, notes_text: &str, period: &str) -> Result<String> {
        let prompt = build_recap_prompt(notes_text, period);
        self.generate(vec![Part::text(prompt)], false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base_url: &str) -> GeminiBackend {
        GeminiBackend::new(GeminiConfig {
            base_url: base_url.to_string(),
            api_key: "k".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.base_url, GEMINI_URL);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.timeout_seconds, 120);
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            backend("http://localhost:9999/").endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_build_parts_text_only_for_notes() {
        let parts = build_parts(&ContentInput::note("hi"), "prompt".to_string());
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].text.as_deref(), Some("prompt"));
    }

    #[test]
    fn test_build_parts_inline_data_first_for_pdf() {
        let parts = build_parts(&ContentInput::pdf("a.pdf", vec![0, 1, 2]), "p".to_string());
        assert_eq!(parts.len(), 2);
        let inline = parts[0].inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type, "application/pdf");
        assert_eq!(inline.data, "AAEC");
        assert_eq!(parts[1].text.as_deref(), Some("p"));
    }

    #[test]
    fn test_model_name() {
        assert_eq!(backend("http://x").model_name(), "gemini-2.0-flash");
    }
}
