//! Configuration loading from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use arxline_arxiv::ArxivConfig;
use arxline_core::HttpConfig;
use arxline_harvest::HarvestConfig;
use arxline_inspire::InspireConfig;
use serde::Deserialize;

/// Global configuration for arxline
///
/// MongoDB settings are deliberately absent: they come from the environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub arxiv: ArxivConfig,
    pub inspire: InspireConfig,
    pub http: HttpSection,
    pub harvest: HarvestConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Extra attempts for transient page-fetch failures
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for HttpSection {
    fn default() -> Self {
        let defaults = HttpConfig::default();
        Self {
            timeout_secs: defaults.timeout.as_secs(),
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            max_retries: defaults.max_retries,
            backoff_base_ms: defaults.backoff_base.as_millis() as u64,
            user_agent: None,
        }
    }
}

impl HttpSection {
    /// Client settings, with CLI flags taking precedence.
    pub fn to_http_config(&self, timeout: Option<u64>, max_retries: Option<u32>) -> HttpConfig {
        let defaults = HttpConfig::default();
        HttpConfig {
            timeout: Duration::from_secs(timeout.unwrap_or(self.timeout_secs)),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_retries: max_retries.unwrap_or(self.max_retries),
            backoff_base: Duration::from_millis(self.backoff_base_ms),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }
}

/// Replace every string of the form `${VAR}` with the variable's value.
fn expand_env_vars(value: &mut toml::Value) -> Result<()> {
    match value {
        toml::Value::String(s) => {
            if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
                *s = std::env::var(var_name).with_context(|| {
                    format!("Environment variable {var_name} referenced in config is not set")
                })?;
            }
        }
        toml::Value::Array(items) => {
            for item in items {
                expand_env_vars(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                expand_env_vars(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./arxline.toml (current directory)
    /// 2. ~/.config/arxline/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("arxline.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "arxline") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let mut value: toml::Value = toml::from_str(content)?;
        expand_env_vars(&mut value)?;
        let config: Config = value.try_into()?;
        config.arxiv.validate()?;
        config.harvest.validate()?;
        Ok(config)
    }
}
