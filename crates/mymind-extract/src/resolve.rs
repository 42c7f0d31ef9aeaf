//! Turning a raw CLI argument into analyzable content.

use std::io::Read;
use std::sync::Arc;

use reqwest::Client;
use tracing::{info, instrument, warn};

use mymind_core::defaults::CLIPBOARD_SOURCE;
use mymind_core::{ext_from_mime, ContentInput, Error, Result};

use crate::clipboard::{ClipboardSource, SystemClipboard};
use crate::image::{download_image, is_image_url};
use crate::pdf::{is_pdf, read_pdf};
use crate::tweet::{fetch_tweet, is_tweet_url};
use crate::web::{fetch_page, is_http_url, FetchConfig};

/// Argument that reads a note from standard input.
pub const STDIN_INPUT: &str = "-";

/// Argument that captures an image from the clipboard.
pub const CLIPBOARD_INPUT: &str = "clipboard";

/// Resolves inputs: clipboard, stdin, PDF path, URL, or plain text.
#[derive(Clone)]
pub struct Extractor {
    client: Client,
    config: FetchConfig,
    clipboard: Arc<dyn ClipboardSource>,
}

impl Extractor {
    pub fn new(config: FetchConfig) -> Result<Self> {
        Ok(Self {
            client: config.build_client()?,
            config,
            clipboard: Arc::new(SystemClipboard),
        })
    }

    /// Replace the clipboard source.
    pub fn with_clipboard(mut self, clipboard: impl ClipboardSource + 'static) -> Self {
        self.clipboard = Arc::new(clipboard);
        self
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Resolve one input, reading standard input for `-`.
    pub async fn resolve(&self, input: &str) -> Result<ContentInput> {
        match input {
            CLIPBOARD_INPUT => self.read_clipboard().await,
            STDIN_INPUT => {
                info!("Reading from stdin");
                read_stdin_note(std::io::stdin().lock())
            }
            _ => self.resolve_target(input).await,
        }
    }

    /// Resolve a PDF path, URL, or plain note text.
    pub async fn resolve_target(&self, input: &str) -> Result<ContentInput> {
        if is_pdf(input) {
            info!(path = %input, "Reading PDF");
            return read_pdf(input);
        }
        if is_http_url(input) {
            return self.resolve_url(input).await;
        }
        Ok(ContentInput::note(input))
    }

    async fn read_clipboard(&self) -> Result<ContentInput> {
        info!("Reading image from clipboard");
        let image = self.clipboard.read_image().await?;
        let ext = ext_from_mime(&image.mime_type);
        Ok(ContentInput::image(
            CLIPBOARD_SOURCE,
            image.data,
            image.mime_type,
            ext,
        ))
    }

    /// Tweets go through oEmbed, images are downloaded, anything else is
    /// fetched as a page. Tweet and page failures degrade to a bare link;
    /// image failures are errors.
    #[instrument(skip(self), fields(subsystem = "extract", component = "resolve", op = "resolve_url"))]
    pub async fn resolve_url(&self, url: &str) -> Result<ContentInput> {
        if is_tweet_url(url) {
            info!("Extracting tweet");
            match fetch_tweet(&self.client, &self.config, url).await {
                Ok(tweet) => return Ok(titled_link(url, &tweet.title, &tweet.text)),
                Err(e) => warn!(error = %e, "tweet extraction failed, treating as link"),
            }
        }

        if is_image_url(&self.client, url).await {
            info!("Downloading image");
            let image = download_image(&self.client, &self.config, url)
                .await
                .map_err(|e| Error::Extraction(format!("could not download image: {}", e)))?;
            return Ok(ContentInput::image(
                url,
                image.data,
                image.mime_type,
                image.extension,
            ));
        }

        info!("Fetching page");
        match fetch_page(&self.client, &self.config, url).await {
            Ok(page) => Ok(titled_link(url, &page.title, &page.text)),
            Err(e) => {
                warn!(error = %e, "could not fetch URL");
                Ok(ContentInput::link(url, url))
            }
        }
    }
}

fn titled_link(url: &str, title: &str, text: &str) -> ContentInput {
    ContentInput::link(url, format!("Title: {}\n\n{}", title, text))
}

/// Read a note from `reader`: lines joined with `\n`, trimmed.
pub fn read_stdin_note<R: Read>(mut reader: R) -> Result<ContentInput> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .map_err(|e| Error::InvalidInput(format!("could not read stdin: {}", e)))?;
    let text = raw.lines().collect::<Vec<_>>().join("\n");
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidInput("no input received from stdin".to_string()));
    }
    Ok(ContentInput::note(text))
}
