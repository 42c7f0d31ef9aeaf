//! # mymind-extract
//!
//! Input resolution for mymind.
//!
//! An [`Extractor`] turns a raw argument into a [`ContentInput`]: images
//! from the clipboard, notes from stdin, local PDFs, tweets via oEmbed,
//! image URLs, and web pages reduced to plain text. Anything else is a
//! plain note.
//!
//! [`ContentInput`]: mymind_core::ContentInput

pub mod clipboard;
pub mod html;
pub mod image;
pub mod pdf;
pub mod resolve;
pub mod tweet;
pub mod web;

pub use clipboard::{detect_clipboard_mime, ClipboardImage, ClipboardSource, SystemClipboard};
pub use html::{extract_page_text, html_to_text, PageText};
pub use image::{detect_image_type, download_image, is_image_url, ImageDownload};
pub use pdf::{is_pdf, read_pdf};
pub use resolve::{read_stdin_note, Extractor, CLIPBOARD_INPUT, STDIN_INPUT};
pub use tweet::{fetch_tweet, is_tweet_url, Tweet};
pub use web::{fetch_page, is_http_url, FetchConfig, TWITTER_OEMBED_URL};
