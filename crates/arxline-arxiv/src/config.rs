//! arXiv listing configuration

use serde::Deserialize;

/// Listing endpoint and category filter
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArxivConfig {
    /// Base URL of the query endpoint
    pub base_url: String,
    /// arXiv category, sent as `cat:{topic}`
    pub topic: String,
}

impl Default for ArxivConfig {
    fn default() -> Self {
        Self {
            base_url: "http://export.arxiv.org/api/query".to_string(),
            topic: "astro-ph.SR".to_string(),
        }
    }
}

impl ArxivConfig {
    /// The `search_query` value for this topic
    pub fn search_query(&self) -> String {
        format!("cat:{}", self.topic.trim())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.topic.trim().is_empty(), "arXiv topic must not be empty");
        anyhow::ensure!(
            self.base_url.starts_with("http://") || self.base_url.starts_with("https://"),
            "arXiv base URL must be http(s): {}",
            self.base_url
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ArxivConfig::default();
        assert_eq!(config.topic, "astro-ph.SR");
        assert!(config.base_url.ends_with("/api/query"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn search_query_format() {
        let config = ArxivConfig {
            topic: " hep-th ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.search_query(), "cat:hep-th");
    }

    #[test]
    fn empty_topic_rejected() {
        let config = ArxivConfig {
            topic: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_base_url_rejected() {
        let config = ArxivConfig {
            base_url: "ftp://export.arxiv.org".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
