//! Persisted paper record

use serde::{Deserialize, Serialize};

/// One harvested paper as stored in the collection.
///
/// Field order is the document's field order. `citations` is stored as null
/// when the lookup found nothing; `text` is left out of the document unless
/// full-text enrichment produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub published: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub doi: String,
    pub citations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PaperRecord {
    pub fn to_document(&self) -> mongodb::bson::ser::Result<mongodb::bson::Document> {
        mongodb::bson::to_document(self)
    }
}
