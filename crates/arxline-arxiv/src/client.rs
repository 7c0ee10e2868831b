//! Paginated arXiv listing client

use arxline_core::{HttpConfig, HttpError, RetryPolicy, Retryable, build_client, get_text};

use crate::config::ArxivConfig;
use crate::parser::{PaperEntry, parse_feed};

/// Outcome of one listing request
#[derive(Debug)]
pub enum Page {
    /// At least one entry; never more than the requested page size
    Entries {
        entries: Vec<PaperEntry>,
        total_results: Option<u64>,
    },
    /// The feed had no entries: end of results
    Exhausted,
}

/// Error fetching or decoding a listing page
#[derive(Debug)]
pub enum SourceError {
    Http(HttpError),
    /// Body is not a well-formed Atom feed
    Parse(String),
    /// arXiv rejected the query (error entry in the feed)
    Api(String),
    /// Caller passed a page size of zero
    InvalidPageSize,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(e) => write!(f, "{e}"),
            Self::Parse(msg) => write!(f, "malformed feed: {msg}"),
            Self::Api(msg) => write!(f, "arXiv API error: {msg}"),
            Self::InvalidPageSize => write!(f, "page size must be positive"),
        }
    }
}

impl std::error::Error for SourceError {}

impl Retryable for SourceError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_retryable(),
            Self::Parse(_) | Self::Api(_) | Self::InvalidPageSize => false,
        }
    }
}

impl From<HttpError> for SourceError {
    fn from(e: HttpError) -> Self {
        Self::Http(e)
    }
}

/// Client for the arXiv query endpoint, bound to one topic
pub struct ArxivClient {
    client: reqwest::Client,
    config: ArxivConfig,
    retry: RetryPolicy,
}

impl ArxivClient {
    pub fn new(config: ArxivConfig, http: &HttpConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            client: build_client(http)?,
            config,
            retry: http.retry_policy(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.config.topic
    }

    /// Fetch one page of entries starting at offset `start` (single attempt).
    pub fn fetch_page(&self, start: usize, page_size: usize) -> Result<Page, SourceError> {
        if page_size == 0 {
            return Err(SourceError::InvalidPageSize);
        }

        let search_query = self.config.search_query();
        let start_param = start.to_string();
        let max_param = page_size.to_string();
        log::debug!("GET {} {search_query} start={start} max_results={page_size}", self.config.base_url);

        let body = get_text(
            &self.client,
            &self.config.base_url,
            &[
                ("search_query", search_query.as_str()),
                ("start", start_param.as_str()),
                ("max_results", max_param.as_str()),
            ],
        )?;

        let feed = parse_feed(&body).map_err(|e| SourceError::Parse(format!("{e:#}")))?;
        if let Some(msg) = feed.api_error {
            return Err(SourceError::Api(msg));
        }

        let mut entries = feed.entries;
        if entries.is_empty() {
            return Ok(Page::Exhausted);
        }
        if entries.len() > page_size {
            log::warn!(
                "arXiv returned {} entries for a page of {page_size}, truncating",
                entries.len()
            );
            entries.truncate(page_size);
        }

        Ok(Page::Entries {
            entries,
            total_results: feed.total_results,
        })
    }

    /// [`fetch_page`](Self::fetch_page) under the configured retry policy.
    pub fn fetch_page_with_retry(
        &self,
        start: usize,
        page_size: usize,
    ) -> Result<Page, SourceError> {
        let label = format!("arXiv page @{start}");
        arxline_core::retry_with_backoff(&label, self.retry, || self.fetch_page(start, page_size))
    }
}
