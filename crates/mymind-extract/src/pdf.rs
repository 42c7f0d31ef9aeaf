//! Local PDF files.

use std::path::Path;

use mymind_core::defaults::MAX_PDF_BYTES;
use mymind_core::{ContentInput, Error, Result};

/// Whether `input` names an existing file with a `.pdf` extension.
pub fn is_pdf(input: &str) -> bool {
    input.to_lowercase().ends_with(".pdf") && Path::new(input).exists()
}

/// Read a PDF as content for analysis.
pub fn read_pdf(path: &str) -> Result<ContentInput> {
    read_pdf_with_limit(path, MAX_PDF_BYTES)
}

pub fn read_pdf_with_limit(path: &str, max_bytes: u64) -> Result<ContentInput> {
    let meta = std::fs::metadata(path)
        .map_err(|e| Error::Extraction(format!("cannot access PDF file: {}", e)))?;
    if meta.len() > max_bytes {
        return Err(Error::Extraction(format!(
            "PDF file too large: {} bytes (max {})",
            meta.len(),
            max_bytes
        )));
    }
    let data = std::fs::read(path)?;
    Ok(ContentInput::pdf(path, data))
}
