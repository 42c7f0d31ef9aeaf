//! Google Gemini backend over the public REST API.
//!
//! # Example
//!
//! ```rust,no_run
//! use mymind_inference::gemini::{GeminiBackend, GeminiConfig};
//! use mymind_core::{ContentAnalyzer, ContentInput};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // From environment variables (GEMINI_API_KEY, GEMINI_BASE_URL)
//!     let backend = GeminiBackend::from_env(None).unwrap();
//!
//!     // Or with custom config
//!     let backend = GeminiBackend::new(GeminiConfig {
//!         api_key: "your-key".to_string(),
//!         model: "gemini-2.0-flash".to_string(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//!     let result = backend
//!         .analyze(&ContentInput::note("Ownership rules in Rust"), None)
//!         .await
//!         .unwrap();
//!     println!("{}: {:?}", result.title, result.tags);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{build_parts, GeminiBackend, GeminiConfig, API_KEY_HEADER};
pub use error::{to_mymind_error, GeminiErrorCode};
pub use types::*;
