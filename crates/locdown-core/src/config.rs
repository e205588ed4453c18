use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ids::IdKind;

/// Retry policy parameters for fetches (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per fetch (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Starting guesses for max-id discovery, per id kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub recording: Option<u64>,
    #[serde(default)]
    pub artist: Option<u64>,
}

/// Global configuration loaded from `~/.config/locdown/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocdownConfig {
    /// Maximum number of batch tasks running at once.
    pub max_connections: usize,
    /// Fallback redraw period for the progress line when no widget declares one.
    pub monitor_interval_ms: u64,
    /// Hard ceiling on probes per max-id search.
    pub max_probes: u32,
    /// Age after which a cached max id is rediscovered.
    pub max_id_refresh_secs: u64,
    /// Fixed progress line width (None = terminal width).
    #[serde(default)]
    pub progress_width: Option<usize>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional overrides for the built-in max-id seeds.
    #[serde(default)]
    pub seeds: Option<SeedConfig>,
}

impl Default for LocdownConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            monitor_interval_ms: 100,
            max_probes: 64,
            max_id_refresh_secs: 24 * 60 * 60,
            progress_width: None,
            retry: None,
            seeds: None,
        }
    }
}

impl LocdownConfig {
    pub fn monitor_interval(&self) -> Duration {
        Duration::from_millis(self.monitor_interval_ms.max(1))
    }

    pub fn max_id_refresh(&self) -> Duration {
        Duration::from_secs(self.max_id_refresh_secs)
    }

    /// First guess for max-id discovery: configured override, else the built-in seed.
    pub fn seed(&self, kind: IdKind) -> u64 {
        let configured = self.seeds.as_ref().and_then(|s| match kind {
            IdKind::Recording => s.recording,
            IdKind::Artist => s.artist,
        });
        configured.unwrap_or_else(|| kind.seed())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("locdown")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LocdownConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<LocdownConfig> {
    if !path.exists() {
        let default_cfg = LocdownConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LocdownConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
