//! # mymind-core
//!
//! Core types, traits, and codecs for the mymind note vault.
//!
//! This crate provides the note data model, the frontmatter codec, the
//! content fingerprint used for deduplication, tag and slug normalization,
//! and the trait definitions for the generative-AI collaborator. Every other
//! mymind crate depends on it.

pub mod defaults;
pub mod error;
pub mod file_safety;
pub mod frontmatter;
pub mod models;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use file_safety::{detect_image_mime, ext_from_mime, image_mime_for_ext, slugify};
pub use frontmatter::Frontmatter;
pub use models::*;
pub use tags::{normalize_tags, sanitize_tag};
pub use traits::*;
