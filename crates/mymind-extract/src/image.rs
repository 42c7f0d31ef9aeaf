//! Image URL detection and download.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, instrument};

use mymind_core::{detect_image_mime, ext_from_mime, image_mime_for_ext, Error, Result};

use crate::web::{read_limited, require_ok, FetchConfig};

/// A downloaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDownload {
    pub data: Vec<u8>,
    pub mime_type: String,
    /// Extension with a leading dot.
    pub extension: String,
}

/// Lowercased extension (with dot) of the URL path, or empty.
pub fn url_path_ext(raw_url: &str) -> String {
    let Ok(url) = url::Url::parse(raw_url) else {
        return String::new();
    };
    let last = url.path().rsplit('/').next().unwrap_or_default();
    match last.rfind('.') {
        Some(idx) if idx > 0 => last[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Whether the URL path ends in a known image extension.
pub fn has_image_extension(raw_url: &str) -> bool {
    image_mime_for_ext(&url_path_ext(raw_url)).is_some()
}

fn content_type(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Whether the URL points at an image: by extension, else by a HEAD
/// request reporting `image/*`. Network failures mean "no".
#[instrument(skip(client), fields(subsystem = "extract", component = "image", op = "probe"))]
pub async fn is_image_url(client: &Client, url: &str) -> bool {
    if has_image_extension(url) {
        return true;
    }
    match client.head(url).send().await {
        Ok(response) => content_type(&response).starts_with("image/"),
        Err(e) => {
            debug!(error = %e, "HEAD probe failed");
            false
        }
    }
}

/// MIME type and extension for an image: URL extension first, then the
/// Content-Type header, then magic bytes, else JPEG.
pub fn detect_image_type(raw_url: &str, content_type: &str, data: &[u8]) -> (String, String) {
    let ext = url_path_ext(raw_url);
    if let Some(mime) = image_mime_for_ext(&ext) {
        return (mime.to_string(), ext);
    }

    let declared = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    if let Some(mime) = [
        "image/jpeg",
        "image/png",
        "image/gif",
        "image/webp",
        "image/bmp",
    ]
    .into_iter()
    .find(|m| *m == declared)
    {
        return (mime.to_string(), ext_from_mime(mime).to_string());
    }

    if let Some(mime) = detect_image_mime(data) {
        let ext = ext_from_mime(&mime).to_string();
        return (mime, ext);
    }

    ("image/jpeg".to_string(), ".jpg".to_string())
}

/// Download an image. Requires status 200, an `image/*` Content-Type and a
/// body no larger than `max_image_bytes`.
#[instrument(skip(client, config), fields(subsystem = "extract", component = "image", op = "download"))]
pub async fn download_image(
    client: &Client,
    config: &FetchConfig,
    url: &str,
) -> Result<ImageDownload> {
    let response = require_ok(client.get(url).send().await?)?;

    let declared = content_type(&response);
    if !declared.starts_with("image/") {
        return Err(Error::Extraction(format!(
            "not an image (Content-Type: {})",
            declared
        )));
    }

    let (data, too_large) = read_limited(response, config.max_image_bytes).await?;
    if too_large {
        return Err(Error::Extraction(format!(
            "image too large (max {}MB)",
            config.max_image_bytes / (1024 * 1024)
        )));
    }

    let (mime_type, extension) = detect_image_type(url, &declared, &data);
    debug!(bytes = data.len(), mime = %mime_type, "image downloaded");
    Ok(ImageDownload {
        data,
        mime_type,
        extension,
    })
}
