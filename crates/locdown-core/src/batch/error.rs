use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// Concurrency ceiling must be at least 1.
    #[error("batch concurrency limit must be at least 1")]
    InvalidLimit,
    /// The batch's cancellation token fired before every task completed.
    #[error("batch cancelled after {done} of {total} tasks")]
    Cancelled { done: usize, total: usize },
}
