use thiserror::Error;

/// Construction-time errors for the renderer and its widgets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressError {
    #[error("{side} template has {placeholders} placeholder(s) but {widgets} widget(s)")]
    Template {
        side: &'static str,
        placeholders: usize,
        widgets: usize,
    },
    #[error("bar glyph ramp needs at least 2 glyphs, got {0}")]
    Ramp(usize),
    #[error("spinner needs at least 1 glyph")]
    NoSpinnerGlyphs,
}
