use std::time::Duration;

use crate::batch::BatchSnapshot;
use crate::progress::ProgressError;

use super::Widget;

/// Cycles through its glyphs once per `period`, then shows a check mark
/// once the batch is complete.
#[derive(Debug, Clone)]
pub struct Spinner {
    glyphs: Vec<char>,
    done: char,
    frame: Duration,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::from_glyphs(Self::DOTS.chars().collect(), Duration::from_secs(1))
    }
}

impl Spinner {
    pub const SIMPLE: &'static str = "|/-\\";
    /// Braille dot loop.
    pub const DOTS: &'static str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
    pub const DONE: char = '✓';

    pub fn with_glyphs(glyphs: &str, period: Duration) -> Result<Self, ProgressError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(ProgressError::NoSpinnerGlyphs);
        }
        Ok(Self::from_glyphs(glyphs, period))
    }

    /// `glyphs` must be non-empty.
    fn from_glyphs(glyphs: Vec<char>, period: Duration) -> Self {
        let frame = (period / glyphs.len() as u32).max(Duration::from_millis(1));
        Self {
            glyphs,
            done: Self::DONE,
            frame,
        }
    }

    pub fn done_glyph(mut self, done: char) -> Self {
        self.done = done;
        self
    }
}

impl Widget for Spinner {
    fn render(&self, _width: usize, state: &BatchSnapshot) -> String {
        if state.is_complete() {
            return self.done.to_string();
        }
        let frame = state.elapsed.as_nanos() / self.frame.as_nanos();
        let index = (frame % self.glyphs.len() as u128) as usize;
        self.glyphs[index].to_string()
    }

    fn update_interval(&self) -> Option<Duration> {
        Some(self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> BatchSnapshot {
        BatchSnapshot::new(1, 4).with_elapsed(Duration::from_millis(ms))
    }

    #[test]
    fn advances_one_glyph_per_frame() {
        let s = Spinner::with_glyphs(Spinner::SIMPLE, Duration::from_millis(400)).unwrap();
        assert_eq!(s.update_interval(), Some(Duration::from_millis(100)));
        assert_eq!(s.render(1, &at(0)), "|");
        assert_eq!(s.render(1, &at(99)), "|");
        assert_eq!(s.render(1, &at(100)), "/");
        assert_eq!(s.render(1, &at(250)), "-");
        assert_eq!(s.render(1, &at(399)), "\\");
        assert_eq!(s.render(1, &at(400)), "|");
    }

    #[test]
    fn freezes_on_done_glyph() {
        let s = Spinner::default();
        let done = BatchSnapshot::new(4, 4).with_elapsed(Duration::from_millis(1234));
        assert_eq!(s.render(1, &done), "✓");
        assert_eq!(s.clone().done_glyph('*').render(1, &done), "*");
    }

    #[test]
    fn default_uses_dots() {
        let s = Spinner::default();
        assert_eq!(s.render(1, &at(0)), "⠋");
        assert_eq!(s.update_interval(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn empty_glyphs_rejected() {
        assert_eq!(
            Spinner::with_glyphs("", Duration::from_secs(1)).unwrap_err(),
            ProgressError::NoSpinnerGlyphs
        );
    }
}
