//! Error types for mymind.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using mymind's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for mymind operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File does not start with a `---` frontmatter block
    #[error("Not a note (missing frontmatter): {}", .0.display())]
    NotFrontmatter(PathBuf),

    /// Vault root is missing or cannot be walked
    #[error("Vault not found: {}", .0.display())]
    VaultNotFound(PathBuf),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Content extraction failed (clipboard, PDF, image download)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_frontmatter() {
        let err = Error::NotFrontmatter(PathBuf::from("vault/readme.md"));
        assert_eq!(
            err.to_string(),
            "Not a note (missing frontmatter): vault/readme.md"
        );
    }

    #[test]
    fn test_error_display_vault_not_found() {
        let err = Error::VaultNotFound(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "Vault not found: /nope");
    }

    #[test]
    fn test_error_display_inference() {
        let err = Error::Inference("model timeout".to_string());
        assert_eq!(err.to_string(), "Inference error: model timeout");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn test_error_display_extraction() {
        let err = Error::Extraction("clipboard is empty".to_string());
        assert_eq!(err.to_string(), "Extraction error: clipboard is empty");
    }

    #[test]
    fn test_error_display_request_status() {
        let err = Error::Request("HTTP 404".to_string());
        assert_eq!(err.to_string(), "Request error: HTTP 404");
    }

    #[test]
    fn test_missing_note_file_becomes_io_error() {
        let dir = std::env::temp_dir().join("mymind-error-test-missing");
        let err: Error = std::fs::read_to_string(dir.join("gone.md"))
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("I/O error: "));
    }

    #[test]
    fn test_malformed_model_json_becomes_serialization_error() {
        let err: Error = serde_json::from_str::<crate::models::AiResult>("{\"title\": 7}")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Serialization(ref msg) if msg.contains("invalid type")));
    }
}
