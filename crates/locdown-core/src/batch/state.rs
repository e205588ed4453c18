//! Completion counters shared between the executor, its tasks and the monitor.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::time::Instant;

/// Live counters for one batch run. Only the executor increments; everyone
/// else reads through [`BatchSnapshot`].
#[derive(Debug)]
pub struct BatchState {
    num_total: usize,
    num_done: AtomicUsize,
    started: Instant,
}

impl BatchState {
    pub(crate) fn new(num_total: usize) -> Self {
        Self {
            num_total,
            num_done: AtomicUsize::new(0),
            started: Instant::now(),
        }
    }

    /// Record one finished task (success or failure).
    pub(crate) fn complete_one(&self) {
        let prev = self.num_done.fetch_add(1, Ordering::AcqRel);
        debug_assert!(prev < self.num_total, "more completions than tasks");
    }

    pub fn num_total(&self) -> usize {
        self.num_total
    }

    pub fn num_done(&self) -> usize {
        self.num_done.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> BatchSnapshot {
        BatchSnapshot {
            num_done: self.num_done(),
            num_total: self.num_total,
            elapsed: self.started.elapsed(),
        }
    }
}

/// Read-only view of a batch handed to monitors and progress widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSnapshot {
    /// Tasks finished so far.
    pub num_done: usize,
    /// Tasks in the batch.
    pub num_total: usize,
    /// Time since the batch started.
    pub elapsed: Duration,
}

impl BatchSnapshot {
    pub fn new(num_done: usize, num_total: usize) -> Self {
        Self {
            num_done,
            num_total,
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn is_complete(&self) -> bool {
        self.num_done >= self.num_total
    }
}
