//! Blocking HTTP helpers over async reqwest.
//!
//! Requests run on one shared tokio runtime via `block_on`, so the pipeline
//! itself stays a plain sequential loop.

use std::sync::LazyLock;
use std::time::Duration;

use crate::error::HttpError;
use crate::retry::RetryPolicy;

/// HTTP settings shared by every remote client
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Retry attempts for transient failures (0 = single attempt)
    pub max_retries: u32,
    /// First backoff step; doubles on each retry
    pub backoff_base: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(30),
            max_retries: 0,
            backoff_base: Duration::from_secs(1),
            user_agent: concat!("arxline/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: self.backoff_base,
        }
    }
}

/// Shared tokio runtime for HTTP and database operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Build an async client from config.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, HttpError> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(HttpError::from_reqwest)
}

/// GET `url` with query parameters and return the body as text.
///
/// Non-2xx statuses are errors.
pub fn get_text(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<String, HttpError> {
    SHARED_RUNTIME.handle().block_on(async {
        let resp = client
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(HttpError::from_reqwest)?;
        resp.text().await.map_err(HttpError::from_reqwest)
    })
}

/// GET `url` and return the raw body.
pub fn get_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, HttpError> {
    SHARED_RUNTIME.handle().block_on(async {
        let resp = client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(HttpError::from_reqwest)?;
        let bytes = resp.bytes().await.map_err(HttpError::from_reqwest)?;
        Ok(bytes.to_vec())
    })
}
