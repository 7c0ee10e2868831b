//! INSPIRE literature search client

use arxline_core::{HttpConfig, HttpError, build_client, get_text};
use serde::Deserialize;

use crate::config::InspireConfig;

#[derive(Debug, Deserialize)]
struct LiteratureResponse {
    #[serde(default)]
    hits: Hits,
}

#[derive(Debug, Default, Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    citation_count: Option<u32>,
}

/// Extract `hits.hits[0].metadata.citation_count` from a literature response.
///
/// `Ok(None)` when there is no hit or the first hit carries no count.
pub fn citation_count_from_json(body: &str) -> Result<Option<u32>, HttpError> {
    let response: LiteratureResponse =
        serde_json::from_str(body).map_err(|e| HttpError::Decode(e.to_string()))?;
    Ok(response
        .hits
        .hits
        .into_iter()
        .next()
        .and_then(|hit| hit.metadata.citation_count))
}

pub struct InspireClient {
    client: reqwest::Client,
    config: InspireConfig,
}

impl InspireClient {
    pub fn new(config: InspireConfig, http: &HttpConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(http)?,
            config,
        })
    }

    /// Citation count for an arXiv id (single attempt).
    pub fn lookup_citations(&self, arxiv_id: &str) -> Result<Option<u32>, HttpError> {
        let query = format!("arxiv:{arxiv_id}");
        let body = get_text(
            &self.client,
            &self.config.base_url,
            &[("q", query.as_str()), ("fields", "citation_count")],
        )?;

        let count = citation_count_from_json(&body)?;
        if count.is_none() {
            log::debug!("No citation data found for arXiv ID: {arxiv_id}");
        }
        Ok(count)
    }
}
