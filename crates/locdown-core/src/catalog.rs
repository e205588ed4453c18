//! Persisted max id per id kind.
//!
//! Discovering the max id costs a few dozen probes, so the last result is
//! kept under the XDG data dir (`~/.local/share/locdown/max_<kind>_id`) and
//! reused until it is older than the refresh window.

use anyhow::{Context, Result};
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use crate::boundary::{BoundaryFinder, Validity};
use crate::ids::IdKind;

/// Default age after which a cached max id is rediscovered (one day).
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct MaxIdCache {
    dir: PathBuf,
    refresh: Duration,
}

impl MaxIdCache {
    /// Cache in `~/.local/share/locdown/`, created if missing.
    pub fn open_default(refresh: Duration) -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("locdown")?;
        let dir = xdg_dirs.get_data_home();
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(Self::at(dir, refresh))
    }

    pub fn at(dir: impl Into<PathBuf>, refresh: Duration) -> Self {
        Self {
            dir: dir.into(),
            refresh,
        }
    }

    fn path(&self, kind: IdKind) -> PathBuf {
        self.dir.join(format!("max_{}_id", kind))
    }

    /// Last stored max id, if any.
    pub fn get(&self, kind: IdKind) -> Result<Option<u64>> {
        let path = self.path(kind);
        if !path.exists() {
            return Ok(None);
        }
        let data =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let value = data
            .trim()
            .parse::<u64>()
            .with_context(|| format!("parse max id in {}", path.display()))?;
        Ok(Some(value))
    }

    pub fn store(&self, kind: IdKind, value: u64) -> Result<()> {
        let path = self.path(kind);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, value.to_string()).with_context(|| format!("write {}", path.display()))
    }

    /// True if nothing is stored or the stored value is older than the refresh window.
    pub fn needs_update(&self, kind: IdKind) -> bool {
        let modified = fs::metadata(self.path(kind)).and_then(|m| m.modified());
        match modified {
            Ok(mtime) => SystemTime::now()
                .duration_since(mtime)
                .map(|age| age > self.refresh)
                .unwrap_or(false),
            Err(_) => true,
        }
    }

    /// Rediscover the max id, starting from the cached value (or `seed`), and
    /// store it. The file is rewritten even when unchanged so its age resets.
    pub async fn refresh<P, F>(
        &self,
        kind: IdKind,
        seed: u64,
        finder: &BoundaryFinder,
        probe: P,
    ) -> Result<u64>
    where
        P: FnMut(u64) -> F,
        F: Future<Output = Validity>,
    {
        let saved = self.get(kind)?;
        let start = saved.unwrap_or(seed).max(1);
        let found = finder
            .find(start, probe)
            .await
            .with_context(|| format!("discover max {} id", kind))?;
        if saved != Some(found) {
            tracing::info!(%kind, previous = ?saved, found, "max id changed");
        }
        self.store(kind, found)?;
        Ok(found)
    }

    /// Cached max id if fresh, otherwise [`refresh`](Self::refresh).
    pub async fn resolve<P, F>(
        &self,
        kind: IdKind,
        seed: u64,
        finder: &BoundaryFinder,
        probe: P,
    ) -> Result<u64>
    where
        P: FnMut(u64) -> F,
        F: Future<Output = Validity>,
    {
        if !self.needs_update(kind) {
            if let Some(value) = self.get(kind)? {
                tracing::debug!(%kind, value, "using cached max id");
                return Ok(value);
            }
        }
        self.refresh(kind, seed, finder, probe).await
    }
}
