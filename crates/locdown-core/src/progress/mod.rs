//! Single-line terminal progress display built from pluggable widgets.
//!
//! A [`ProgressRenderer`] lays out a left and a right segment of widgets
//! inside a fixed width and is typically used as a batch monitor:
//!
//! ```no_run
//! use locdown_core::progress::{Bar, Fraction, Percent, ProgressRenderer, Spinner};
//!
//! let line = ProgressRenderer::builder()
//!     .left(vec![
//!         Box::new(Spinner::default()),
//!         Box::new(Fraction::default()),
//!         Box::new(Percent::default()),
//!         Box::new(Bar::default()),
//!     ])
//!     .left_template("{} {} ({}) {}")
//!     .build()
//!     .unwrap();
//! # let _ = line;
//! ```

mod error;
mod renderer;
mod terminal;
mod widget;

pub use error::ProgressError;
pub use renderer::{FillDirection, ProgressRenderer, ProgressRendererBuilder};
pub use terminal::{terminal_width, FALLBACK_WIDTH};
pub use widget::{Bar, Fraction, Padding, Percent, Spinner, Widget};
