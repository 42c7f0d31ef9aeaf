//! HTTP fetching for page and image extraction.

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, instrument};

use mymind_core::defaults::{
    FETCH_TIMEOUT_SECS, MAX_EXTRACT_CHARS, MAX_HTML_BYTES, MAX_IMAGE_BYTES,
};
use mymind_core::{Error, Result};

use crate::html::{extract_page_text, PageText};

/// Default oEmbed endpoint for tweets.
pub const TWITTER_OEMBED_URL: &str = "https://publish.twitter.com/oembed";

/// Settings shared by every fetch.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub oembed_url: String,
    pub max_html_bytes: usize,
    pub max_image_bytes: usize,
    pub max_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: FETCH_TIMEOUT_SECS,
            user_agent: format!("mymind/{}", env!("CARGO_PKG_VERSION")),
            oembed_url: TWITTER_OEMBED_URL.to_string(),
            max_html_bytes: MAX_HTML_BYTES,
            max_image_bytes: MAX_IMAGE_BYTES,
            max_chars: MAX_EXTRACT_CHARS,
        }
    }
}

impl FetchConfig {
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| Error::Request(format!("Failed to create HTTP client: {}", e)))
    }
}

/// Whether `input` parses as an absolute http(s) URL.
pub fn is_http_url(input: &str) -> bool {
    url::Url::parse(input)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Fail unless the response status is 200.
pub(crate) fn require_ok(response: Response) -> Result<Response> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(Error::Request(format!("HTTP {}", status.as_u16())));
    }
    Ok(response)
}

/// Read at most `limit` bytes of the body. Returns the bytes and whether
/// the body was longer than `limit`.
pub(crate) async fn read_limited(mut response: Response, limit: usize) -> Result<(Vec<u8>, bool)> {
    let mut data = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - data.len();
        if chunk.len() > room {
            data.extend_from_slice(&chunk[..room]);
            return Ok((data, true));
        }
        data.extend_from_slice(&chunk);
    }
    Ok((data, false))
}

/// Fetch a web page and extract its title and readable text.
///
/// Bodies beyond `max_html_bytes` are cut off rather than rejected.
#[instrument(skip(client, config), fields(subsystem = "extract", component = "web", op = "fetch_page"))]
pub async fn fetch_page(client: &Client, config: &FetchConfig, url: &str) -> Result<PageText> {
    let response = require_ok(client.get(url).send().await?)?;
    let (body, truncated) = read_limited(response, config.max_html_bytes).await?;
    let html = String::from_utf8_lossy(&body);
    let page = extract_page_text(&html, config.max_chars);
    debug!(
        html_bytes = body.len(),
        truncated,
        text_len = page.text.len(),
        "page extracted"
    );
    Ok(page)
}
