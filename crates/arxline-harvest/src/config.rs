//! Harvest loop configuration

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Offset of the first page
    pub start: usize,
    /// Entries requested per page; also the pagination stride
    pub page_size: usize,
    /// Stop after this many non-empty pages
    pub max_pages: Option<usize>,
    /// Download each paper's PDF and store its text
    pub fetch_fulltext: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            start: 0,
            page_size: 10,
            max_pages: None,
            fetch_fulltext: false,
        }
    }
}

impl HarvestConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.page_size > 0, "harvest.page_size must be positive");
        anyhow::ensure!(
            self.max_pages != Some(0),
            "harvest.max_pages must be positive when set"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = HarvestConfig::default();
        assert_eq!(config.start, 0);
        assert_eq!(config.page_size, 10);
        assert!(config.max_pages.is_none());
        assert!(!config.fetch_fulltext);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_page_size_rejected() {
        let config = HarvestConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_max_pages_rejected() {
        let config = HarvestConfig {
            max_pages: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
