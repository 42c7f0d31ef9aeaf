//! Clipboard image capture through `wl-paste` or `xclip`.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use mymind_core::{detect_image_mime, Error, Result};

/// Image MIME types taken from the clipboard, in order of preference.
pub const CLIPBOARD_MIME_PREFERENCE: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/bmp",
    "image/webp",
    "image/gif",
];

/// Types requested from `xclip`, which cannot list what it holds.
const XCLIP_TARGETS: &[&str] = &["image/png", "image/jpeg", "image/bmp"];

const CLIPBOARD_CMD_TIMEOUT_SECS: u64 = 10;

/// Raw image bytes read from the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

/// Source of clipboard images.
#[async_trait]
pub trait ClipboardSource: Send + Sync {
    async fn read_image(&self) -> Result<ClipboardImage>;
}

/// Preferred image type among those listed by `wl-paste --list-types`.
pub fn detect_clipboard_mime(types: &str) -> Option<&'static str> {
    CLIPBOARD_MIME_PREFERENCE
        .iter()
        .copied()
        .find(|mime| types.lines().any(|line| line.trim() == *mime))
}

/// The desktop clipboard: Wayland first, then X11.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

/// Run a command with a timeout, returning stdout.
async fn run_cmd_with_timeout(cmd: &mut Command, timeout_secs: u64) -> Result<Vec<u8>> {
    let output = tokio::time::timeout(Duration::from_secs(timeout_secs), cmd.output())
        .await
        .map_err(|_| Error::Extraction(format!("command timed out after {}s", timeout_secs)))?
        .map_err(|e| Error::Extraction(format!("failed to run command: {}", e)))?;

    if !output.status.success() {
        return Err(Error::Extraction(format!(
            "command exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(output.stdout)
}

impl SystemClipboard {
    async fn try_wl_paste(&self) -> Result<ClipboardImage> {
        let types = run_cmd_with_timeout(
            Command::new("wl-paste").arg("--list-types"),
            CLIPBOARD_CMD_TIMEOUT_SECS,
        )
        .await
        .map_err(|e| Error::Extraction(format!("wl-paste not available: {}", e)))?;

        let mime = detect_clipboard_mime(&String::from_utf8_lossy(&types))
            .ok_or_else(|| Error::Extraction("no image found in clipboard".to_string()))?;

        let data = run_cmd_with_timeout(
            Command::new("wl-paste").args(["--type", mime]),
            CLIPBOARD_CMD_TIMEOUT_SECS,
        )
        .await?;
        if data.is_empty() {
            return Err(Error::Extraction("clipboard is empty".to_string()));
        }

        Ok(ClipboardImage {
            data,
            mime_type: mime.to_string(),
        })
    }

    async fn try_xclip(&self) -> Result<ClipboardImage> {
        for &mime in XCLIP_TARGETS {
            let result = run_cmd_with_timeout(
                Command::new("xclip").args(["-selection", "clipboard", "-target", mime, "-o"]),
                CLIPBOARD_CMD_TIMEOUT_SECS,
            )
            .await;
            match result {
                Ok(data) if !data.is_empty() => {
                    return Ok(ClipboardImage {
                        data,
                        mime_type: mime.to_string(),
                    })
                }
                Ok(_) => {}
                Err(e) => debug!(mime, error = %e, "xclip target unavailable"),
            }
        }
        Err(Error::Extraction("xclip: no image in clipboard".to_string()))
    }
}

#[async_trait]
impl ClipboardSource for SystemClipboard {
    #[instrument(skip(self), fields(subsystem = "extract", component = "clipboard", op = "read_image"))]
    async fn read_image(&self) -> Result<ClipboardImage> {
        let mut image = match self.try_wl_paste().await {
            Ok(image) => image,
            Err(wl_err) => {
                debug!(error = %wl_err, "wl-paste failed, trying xclip");
                self.try_xclip().await.map_err(|e| {
                    Error::Extraction(format!(
                        "could not read image from clipboard (tried wl-paste and xclip): {}",
                        e
                    ))
                })?
            }
        };

        // xclip happily converts between targets; trust the bytes.
        if let Some(actual) = detect_image_mime(&image.data) {
            if actual != image.mime_type && CLIPBOARD_MIME_PREFERENCE.contains(&actual.as_str()) {
                debug!(declared = %image.mime_type, actual = %actual, "clipboard MIME corrected");
                image.mime_type = actual;
            }
        }
        Ok(image)
    }
}
