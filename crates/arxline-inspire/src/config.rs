//! INSPIRE client configuration

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InspireConfig {
    /// Literature search endpoint
    pub base_url: String,
}

impl Default for InspireConfig {
    fn default() -> Self {
        Self {
            base_url: "https://inspirehep.net/api/literature".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = InspireConfig::default();
        assert!(config.base_url.starts_with("https://inspirehep.net/"));
    }
}
