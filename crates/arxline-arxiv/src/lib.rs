//! arxline arXiv - listing API client
//!
//! Pages through `export.arxiv.org/api/query` for one category and parses
//! the Atom feed into [`PaperEntry`] values.
//!
//! # Example
//!
//! ```ignore
//! use arxline_arxiv::{ArxivClient, ArxivConfig, Page};
//!
//! let client = ArxivClient::new(ArxivConfig::default(), &Default::default())?;
//! match client.fetch_page(0, 10)? {
//!     Page::Entries { entries, .. } => println!("{} entries", entries.len()),
//!     Page::Exhausted => println!("nothing left"),
//! }
//! ```

pub mod client;
pub mod config;
pub mod id;
pub mod parser;

// Re-exports
pub use client::{ArxivClient, Page, SourceError};
pub use config::ArxivConfig;
pub use id::{arxiv_id, doi_suffix, pdf_url};
pub use parser::{Feed, PaperEntry, parse_feed};
