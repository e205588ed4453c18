//! The batch progress line shared by `fetch` and `check`.

use anyhow::Result;
use locdown_core::config::LocdownConfig;
use locdown_core::progress::{Bar, Fraction, Padding, Percent, ProgressRenderer, Spinner};
use std::time::Duration;

/// `⠹  7/20 ( 35%) [███████▌          ]`
pub fn progress_line(cfg: &LocdownConfig) -> Result<ProgressRenderer> {
    let line = ProgressRenderer::builder()
        .left(vec![
            Box::new(Spinner::default()),
            Box::new(Fraction::new(Padding::Spaces)),
            Box::new(Percent::new(Padding::Spaces)),
            Box::new(Bar::default()),
        ])
        .left_template("{} {} ({}) {}")
        .width(cfg.progress_width)
        .build()?;
    Ok(line)
}

/// Redraw often enough for the fastest widget, never slower than the config says.
pub fn redraw_interval(line: &ProgressRenderer, cfg: &LocdownConfig) -> Duration {
    line.update_interval()
        .map_or(cfg.monitor_interval(), |i| i.min(cfg.monitor_interval()))
}
