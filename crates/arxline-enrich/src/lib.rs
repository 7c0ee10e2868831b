//! arxline Enrich - per-paper enrichment that needs no remote metadata API
//!
//! - [`keywords`]: TextRank keyword extraction over an abstract
//! - [`pdf`]: full-text download and extraction (opt-in)

pub mod keywords;
pub mod pdf;
mod stopwords;

// Re-exports
pub use keywords::{KeywordExtractor, extract_keywords};
pub use pdf::{PdfError, download_pdf, extract_text, fetch_text};
