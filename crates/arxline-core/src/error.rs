//! Error type for remote API calls

/// Error from a single HTTP round-trip against a remote API.
///
/// Shared by the arXiv listing client, the INSPIRE citation client and the
/// PDF downloader.
#[derive(Debug)]
pub enum HttpError {
    /// Transport failure or non-success status
    Http {
        status: Option<u16>,
        message: String,
    },
    /// Body arrived but could not be decoded
    Decode(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Create HTTP error from reqwest error.
    ///
    /// The URL is stripped so query strings never end up in logs twice.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.without_url().to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            _ => None,
        }
    }

    /// Transient failures worth another attempt.
    ///
    /// Connection failures (no status), 408, 429 and 5xx are transient;
    /// any other 4xx means the request itself is wrong.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status: None, .. } => true,
            Self::Http {
                status: Some(s), ..
            } => matches!(s, 408 | 429 | 500..=599),
            Self::Decode(_) => false,
        }
    }
}
