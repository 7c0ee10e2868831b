//! arxline INSPIRE - citation counts from the INSPIRE-HEP literature API
//!
//! Looks up an arXiv eprint and returns the `citation_count` of the first hit.
//! "No hit" is an ordinary outcome (`Ok(None)`), distinct from a failed call.

pub mod client;
pub mod config;

// Re-exports
pub use client::{InspireClient, citation_count_from_json};
pub use config::InspireConfig;
