//! Fetch error type for retry classification.

use thiserror::Error;

/// Error returned by one fetch attempt. Kept concrete so failures can be
/// classified for retries before being reported.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the body to disk failed. Not retried.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// The batch was cancelled mid-transfer.
    #[error("aborted")]
    Aborted,
    /// The blocking worker running the transfer panicked or was cancelled.
    #[error("fetch worker failed: {0}")]
    Worker(String),
}
