//! Bounded-concurrency batch execution.
//!
//! Runs a fixed set of independent futures under a concurrency ceiling,
//! counts completions, and drives an optional periodic monitor (usually a
//! progress line). Tasks are multiplexed on the calling task, so they may
//! borrow from the caller.

mod error;
mod executor;
mod state;

pub use error::BatchError;
pub use executor::{BatchExecutor, DEFAULT_MONITOR_INTERVAL};
pub use state::{BatchSnapshot, BatchState};

#[cfg(test)]
mod tests;
