//! PDF full-text download and extraction
//!
//! Extraction is all-or-nothing: a document that fails to load, or any page
//! that fails to decode, yields an error instead of partial text.

use arxline_core::{HttpError, get_bytes};
use lopdf::Document;

#[derive(Debug)]
pub enum PdfError {
    Download(HttpError),
    /// Bytes are not a readable PDF document
    Load(String),
    /// A page's content stream could not be decoded
    Page { page: u32, message: String },
}

impl std::fmt::Display for PdfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Download(e) => write!(f, "PDF download failed: {e}"),
            Self::Load(msg) => write!(f, "unreadable PDF: {msg}"),
            Self::Page { page, message } => write!(f, "PDF page {page}: {message}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<HttpError> for PdfError {
    fn from(e: HttpError) -> Self {
        Self::Download(e)
    }
}

/// Fetch the raw PDF bytes (single attempt).
pub fn download_pdf(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, HttpError> {
    get_bytes(client, url)
}

/// Concatenated text of every page, in page order.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    let document = Document::load_mem(bytes).map_err(|e| PdfError::Load(e.to_string()))?;

    let mut text = String::new();
    for &page in document.get_pages().keys() {
        let page_text = document
            .extract_text(&[page])
            .map_err(|e| PdfError::Page {
                page,
                message: e.to_string(),
            })?;
        text.push_str(&page_text);
    }
    Ok(text)
}

/// Download then extract.
pub fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, PdfError> {
    let bytes = download_pdf(client, url)?;
    log::debug!("Downloaded {} bytes from {url}", bytes.len());
    extract_text(&bytes)
}
