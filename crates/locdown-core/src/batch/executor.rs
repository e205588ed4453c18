//! The executor: semaphore admission gate, completion counting, monitor ticks.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::error::BatchError;
use super::state::{BatchSnapshot, BatchState};

/// Monitor period used when none is configured.
pub const DEFAULT_MONITOR_INTERVAL: Duration = Duration::from_millis(100);

/// Runs a batch of futures with at most `limit` in flight at once.
///
/// Outcomes come back in input order. A task's output is opaque to the
/// executor; tasks that can fail should return a `Result` and the executor
/// simply collects it.
#[derive(Debug, Clone)]
pub struct BatchExecutor {
    /// None = as many as there are tasks.
    limit: Option<usize>,
    monitor_interval: Duration,
    cancel: Option<CancellationToken>,
}

impl BatchExecutor {
    /// Executor admitting at most `limit` concurrent tasks. `limit == 0` is rejected.
    pub fn new(limit: usize) -> Result<Self, BatchError> {
        if limit == 0 {
            return Err(BatchError::InvalidLimit);
        }
        Ok(Self {
            limit: Some(limit),
            monitor_interval: DEFAULT_MONITOR_INTERVAL,
            cancel: None,
        })
    }

    /// Executor that starts every task immediately.
    pub fn unbounded() -> Self {
        Self {
            limit: None,
            monitor_interval: DEFAULT_MONITOR_INTERVAL,
            cancel: None,
        }
    }

    /// Period between monitor calls while tasks are outstanding. Zero is bumped to 1ms.
    pub fn with_monitor_interval(mut self, interval: Duration) -> Self {
        self.monitor_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// When `token` is cancelled, in-flight tasks are dropped and the run fails
    /// with [`BatchError::Cancelled`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn monitor_interval(&self) -> Duration {
        self.monitor_interval
    }

    /// Run `tasks` to completion without a monitor.
    pub async fn run<I, F>(&self, tasks: I) -> Result<Vec<F::Output>, BatchError>
    where
        I: IntoIterator<Item = F>,
        F: Future,
    {
        self.execute(tasks.into_iter().collect(), None).await
    }

    /// Run `tasks` to completion, calling `monitor` once up front, then every
    /// monitor interval while tasks are outstanding, then once more after the
    /// last task finished.
    pub async fn run_with_monitor<I, F, M>(
        &self,
        tasks: I,
        mut monitor: M,
    ) -> Result<Vec<F::Output>, BatchError>
    where
        I: IntoIterator<Item = F>,
        F: Future,
        M: FnMut(&BatchSnapshot),
    {
        self.execute(tasks.into_iter().collect(), Some(&mut monitor))
            .await
    }

    async fn execute<F: Future>(
        &self,
        tasks: Vec<F>,
        mut monitor: Option<&mut dyn FnMut(&BatchSnapshot)>,
    ) -> Result<Vec<F::Output>, BatchError> {
        let state = BatchState::new(tasks.len());
        let cancelled = || BatchError::Cancelled {
            done: state.num_done(),
            total: state.num_total(),
        };
        if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(cancelled());
        }

        let limit = self
            .limit
            .unwrap_or(tasks.len())
            .clamp(1, Semaphore::MAX_PERMITS);
        let gate = Semaphore::new(limit);
        tracing::debug!(total = state.num_total(), limit, "batch started");

        if let Some(m) = monitor.as_mut() {
            m(&state.snapshot());
        }
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let all = join_all(tasks.into_iter().map(|task| {
            let gate = &gate;
            let state = &state;
            async move {
                // The gate is never closed, so acquire only fails if that changes.
                let _permit = gate.acquire().await.ok();
                let output = task.await;
                state.complete_one();
                output
            }
        }));
        tokio::pin!(all);

        let cancel = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(cancel);

        let mut ticker =
            tokio::time::interval_at(Instant::now() + self.monitor_interval, self.monitor_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let results = loop {
            tokio::select! {
                biased;
                _ = &mut cancel => {
                    let err = cancelled();
                    tracing::warn!("{}", err);
                    return Err(err);
                }
                results = &mut all => break results,
                _ = ticker.tick(), if monitor.is_some() => {
                    // The completion branch owns the final call.
                    let snapshot = state.snapshot();
                    if !snapshot.is_complete() {
                        if let Some(m) = monitor.as_mut() {
                            m(&snapshot);
                        }
                    }
                }
            }
        };

        if let Some(m) = monitor.as_mut() {
            m(&state.snapshot());
        }
        tracing::debug!(
            total = state.num_total(),
            elapsed_ms = state.snapshot().elapsed.as_millis() as u64,
            "batch finished"
        );
        Ok(results)
    }
}
