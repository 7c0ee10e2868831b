//! arxline Core - Common infrastructure for the arXiv harvesting pipeline
//!
//! This crate provides the pieces shared by every source client and by the
//! harvest orchestrator: the HTTP client and runtime bridge, the HTTP error
//! taxonomy, the retry policy, logging and progress display.

pub mod error;
pub mod http;
pub mod logging;
pub mod progress;
pub mod retry;
pub mod shutdown;

// Re-exports for convenience
pub use error::HttpError;
pub use http::{HttpConfig, SHARED_RUNTIME, build_client, get_bytes, get_text};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use retry::{RetryPolicy, Retryable, retry_with_backoff};
pub use shutdown::{install_signal_handlers, shutdown_flag};
