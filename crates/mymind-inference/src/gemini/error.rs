//! Gemini-specific error handling.

use mymind_core::Error;

/// Gemini error classes, derived from the HTTP status and error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiErrorCode {
    /// Missing, invalid, or unauthorized API key.
    AuthenticationError,
    /// Model not found or not available to this key.
    ModelNotFound,
    /// Quota or rate limit exceeded.
    RateLimitExceeded,
    /// Malformed request or content the model rejects.
    InvalidRequest,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl GeminiErrorCode {
    /// Classify a failed response.
    ///
    /// Gemini reports a bad API key as `400 INVALID_ARGUMENT`, so the message
    /// is inspected as well as the status.
    pub fn from_response(status: u16, message: &str) -> Self {
        match status {
            401 | 403 => Self::AuthenticationError,
            400 if message.to_lowercase().contains("api key") => Self::AuthenticationError,
            404 => Self::ModelNotFound,
            429 => Self::RateLimitExceeded,
            400 => Self::InvalidRequest,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded | Self::ServerError)
    }
}

/// Convert a Gemini error to a mymind [`Error`].
///
/// Credential and model problems are configuration errors; the rest are
/// inference failures.
pub fn to_mymind_error(code: GeminiErrorCode, message: &str) -> Error {
    match code {
        GeminiErrorCode::AuthenticationError => {
            Error::Config(format!("Authentication failed: {}", message))
        }
        GeminiErrorCode::ModelNotFound => Error::Config(format!("Model not found: {}", message)),
        GeminiErrorCode::RateLimitExceeded => {
            Error::Inference(format!("Rate limit exceeded: {}", message))
        }
        GeminiErrorCode::InvalidRequest => {
            Error::Inference(format!("Invalid request: {}", message))
        }
        GeminiErrorCode::ServerError => Error::Inference(format!("Server error: {}", message)),
        GeminiErrorCode::Unknown => Error::Inference(message.to_string()),
    }
}
