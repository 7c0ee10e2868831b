//! arxline Harvest - Pagination loop from the arXiv listing into a record sink
//!
//! Per entry: citation lookup, keyword extraction, optional full text,
//! then one insert. Enrichment and insert failures degrade or get counted,
//! only a page fetch failure ends the run early.

mod config;
mod record;
mod runner;

pub use config::HarvestConfig;
pub use record::assemble_record;
pub use runner::{Harvester, StopReason, Summary};
