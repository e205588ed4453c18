//! `locdown max-id` – find the highest valid id behind a template.

use anyhow::{Context, Result};
use locdown_core::boundary::BoundaryFinder;
use locdown_core::catalog::MaxIdCache;
use locdown_core::config::LocdownConfig;
use locdown_core::ids::IdKind;
use locdown_core::probe::{HttpProber, UrlTemplate};

pub async fn run_max_id(
    cfg: &LocdownConfig,
    template: &str,
    kind: IdKind,
    start: Option<u64>,
    refresh: bool,
) -> Result<()> {
    let prober = HttpProber::new(UrlTemplate::parse(template)?);
    let finder = BoundaryFinder::new(cfg.max_probes);
    let cache = MaxIdCache::open_default(cfg.max_id_refresh())?;

    let value = match start {
        Some(start) => {
            let found = finder
                .find(start, |id| prober.probe(id))
                .await
                .with_context(|| format!("discover max {} id from {}", kind, start))?;
            cache.store(kind, found)?;
            found
        }
        None if refresh => {
            cache
                .refresh(kind, cfg.seed(kind), &finder, |id| prober.probe(id))
                .await?
        }
        None => {
            cache
                .resolve(kind, cfg.seed(kind), &finder, |id| prober.probe(id))
                .await?
        }
    };

    println!("{}", value);
    Ok(())
}
