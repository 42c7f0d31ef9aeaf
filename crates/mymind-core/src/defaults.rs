//! Centralized default constants for mymind.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// VAULT
// =============================================================================

/// Subfolder (relative to the vault root) that receives new notes.
pub const NOTE_FOLDER: &str = "inbox";

/// File extension of note files.
pub const NOTE_EXTENSION: &str = "md";

/// Slug used when a title yields no usable characters.
pub const FALLBACK_SLUG: &str = "note";

/// Maximum slug length in bytes.
pub const SLUG_MAX_LEN: usize = 50;

/// Marker that opens the generated related-notes section.
pub const RELATED_MARKER: &str = "\n## Related\n";

/// Source value for clipboard captures (never rendered as a source line).
pub const CLIPBOARD_SOURCE: &str = "clipboard";

// =============================================================================
// AI RESULT VALIDATION
// =============================================================================

/// Title used when the model returns an empty one.
pub const UNTITLED: &str = "untitled";

/// Summary used when the model returns an empty one.
pub const EMPTY_SUMMARY: &str = "(no summary)";

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Gemini model.
pub const GEN_MODEL: &str = "gemini-2.0-flash";

/// Default Gemini API endpoint.
pub const GEMINI_URL: &str = "https://generativelanguage.googleapis.com";

/// Sampling temperature for analysis and recap requests.
pub const GEN_TEMPERATURE: f32 = 0.3;

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// EXTRACTION
// =============================================================================

/// Timeout for page, image, and oEmbed fetches (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Maximum characters of extracted page text handed to the model.
pub const MAX_EXTRACT_CHARS: usize = 12_000;

/// Maximum HTML bytes read from a page.
pub const MAX_HTML_BYTES: usize = 5 * 1024 * 1024;

/// Maximum image download size.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Maximum PDF size.
pub const MAX_PDF_BYTES: u64 = 20 * 1024 * 1024;

// =============================================================================
// CLI
// =============================================================================

/// Default number of notes shown by `list`.
pub const LIST_LIMIT: usize = 10;

/// Default result cap for `search`.
pub const SEARCH_LIMIT: usize = 20;

/// Default recap period.
pub const RECAP_PERIOD: &str = "7d";

/// Upper bound on the note digest sent for a recap (bytes).
pub const RECAP_MAX_CHARS: usize = 30_000;

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

/// Vault root.
pub const ENV_VAULT: &str = "MYMIND_VAULT";

/// Subfolder for new notes.
pub const ENV_FOLDER: &str = "MYMIND_FOLDER";

/// Model override.
pub const ENV_MODEL: &str = "MYMIND_MODEL";

/// Custom analysis instructions.
pub const ENV_PROMPT: &str = "MYMIND_PROMPT";

/// Gemini API key.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Gemini endpoint override.
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";

/// Generation timeout override (seconds).
pub const ENV_GEN_TIMEOUT_SECS: &str = "MYMIND_GEN_TIMEOUT_SECS";
