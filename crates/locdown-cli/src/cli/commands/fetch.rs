//! `locdown fetch` – download a batch of ids with a progress line.

use anyhow::{bail, Context, Result};
use locdown_core::batch::{BatchError, BatchExecutor};
use locdown_core::boundary::BoundaryFinder;
use locdown_core::catalog::MaxIdCache;
use locdown_core::config::LocdownConfig;
use locdown_core::ids::{self, IdKind, IdSpec};
use locdown_core::probe::{self, HttpProber, UrlTemplate};
use locdown_core::retry::RetryPolicy;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tokio_util::sync::CancellationToken;

use super::progress_line::{progress_line, redraw_interval};

/// Max id for every kind a random specifier samples from.
async fn max_ids_for(
    cfg: &LocdownConfig,
    specs: &[IdSpec],
    template: &UrlTemplate,
) -> Result<BTreeMap<IdKind, u64>> {
    let mut max_ids = BTreeMap::new();
    let needed = ids::kinds_needing_max_id(specs);
    if needed.is_empty() {
        return Ok(max_ids);
    }
    let cache = MaxIdCache::open_default(cfg.max_id_refresh())?;
    let finder = BoundaryFinder::new(cfg.max_probes);
    let prober = HttpProber::new(template.clone());
    for kind in needed {
        let value = cache
            .resolve(kind, cfg.seed(kind), &finder, |id| prober.probe(id))
            .await?;
        tracing::info!(%kind, value, "max id");
        max_ids.insert(kind, value);
    }
    Ok(max_ids)
}

/// Cancel `token` on Ctrl-C. Abort the returned handle once the batch is over.
pub(super) fn cancel_on_ctrl_c(token: &CancellationToken) -> tokio::task::JoinHandle<()> {
    let token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling batch");
            token.cancel();
        }
    })
}

pub async fn run_fetch(
    cfg: &LocdownConfig,
    template: &str,
    specs: &[String],
    kind: IdKind,
    jobs: Option<usize>,
    dest: &Path,
) -> Result<()> {
    let template = UrlTemplate::parse(template)?;
    let specs = specs
        .iter()
        .map(|s| IdSpec::parse_with_kind(s, kind))
        .collect::<Result<Vec<_>, _>>()?;
    let max_ids = max_ids_for(cfg, &specs, &template).await?;
    let ids = ids::expand(&specs, |k| max_ids.get(&k).copied(), &mut rand::thread_rng())?;

    fs::create_dir_all(dest).with_context(|| format!("create {}", dest.display()))?;

    let policy = cfg
        .retry
        .as_ref()
        .map(RetryPolicy::from)
        .unwrap_or_default();
    let cancel = CancellationToken::new();
    let line = progress_line(cfg)?;
    let executor = BatchExecutor::new(jobs.unwrap_or(cfg.max_connections))?
        .with_monitor_interval(redraw_interval(&line, cfg))
        .with_cancellation(cancel.clone());

    let tasks = ids.iter().map(|id| {
        let url = template.expand(id.value);
        let path = dest.join(id.file_name());
        let download = probe::fetch(url, path, policy, cancel.clone());
        async move { (*id, download.await) }
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
            bail!("interrupted after {}/{} downloads", done, total);
        }
        Err(e) => return Err(e.into()),
    };

    let mut failed = 0usize;
    for (id, result) in &results {
        match result {
            Ok(bytes) => tracing::debug!(%id, bytes, "downloaded"),
            Err(e) => {
                failed += 1;
                eprintln!("warning: {}: {}", id, e);
                tracing::warn!(%id, "download failed: {}", e);
            }
        }
    }
    println!(
        "{} downloaded, {} failed, into {}",
        results.len() - failed,
        failed,
        dest.display()
    );
    Ok(())
}
