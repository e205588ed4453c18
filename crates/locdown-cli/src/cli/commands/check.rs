//! `locdown check` – probe ids and report which exist.

use anyhow::{bail, Result};
use locdown_core::batch::{BatchError, BatchExecutor};
use locdown_core::boundary::Validity;
use locdown_core::config::LocdownConfig;
use locdown_core::ids::{self, IdSpec};
use locdown_core::probe::{HttpProber, UrlTemplate};
use std::io;
use tokio_util::sync::CancellationToken;

use super::fetch::cancel_on_ctrl_c;
use super::progress_line::{progress_line, redraw_interval};

pub async fn run_check(
    cfg: &LocdownConfig,
    template: &str,
    specs: &[String],
    jobs: Option<usize>,
) -> Result<()> {
    let prober = HttpProber::new(UrlTemplate::parse(template)?);
    let specs = specs
        .iter()
        .map(|s| s.parse::<IdSpec>())
        .collect::<Result<Vec<_>, _>>()?;
    let ids = ids::expand(&specs, |_| None, &mut rand::thread_rng())?;

    let cancel = CancellationToken::new();
    let line = progress_line(cfg)?;
    let executor = BatchExecutor::new(jobs.unwrap_or(cfg.max_connections))?
        .with_monitor_interval(redraw_interval(&line, cfg))
        .with_cancellation(cancel.clone());

    let tasks = ids.iter().map(|id| {
        let probe = prober.probe(id.value);
        async move { (*id, probe.await) }
    });

    let interrupt = cancel_on_ctrl_c(&cancel);
    let outcome = executor
        .run_with_monitor(tasks, line.monitor(io::stderr()))
        .await;
    interrupt.abort();

    let results = match outcome {
        Ok(results) => results,
        Err(BatchError::Cancelled { done, total }) => {
            eprintln!();
            bail!("interrupted after {}/{} probes", done, total);
        }
        Err(e) => return Err(e.into()),
    };

    let mut valid = 0usize;
    for (id, validity) in &results {
        let label = match validity {
            Validity::Valid => {
                valid += 1;
                "valid"
            }
            Validity::Invalid => "missing",
        };
        println!("{:<10} {:<10} {}", id.kind, id.value, label);
    }
    println!("{}/{} valid", valid, results.len());
    Ok(())
}
