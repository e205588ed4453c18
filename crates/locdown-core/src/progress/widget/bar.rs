//! Block gauge with sub-character resolution.

use crate::batch::BatchSnapshot;
use crate::progress::ProgressError;

use super::Widget;

/// Fills its available width (minus caps) proportionally to `done/total`.
///
/// The cell straddling the threshold uses an intermediate glyph picked by the
/// fractional part; an empty batch renders an empty gauge.
#[derive(Debug, Clone)]
pub struct Bar {
    glyphs: Vec<char>,
    caps: Option<(char, char)>,
    max_width: Option<usize>,
}

impl Default for Bar {
    fn default() -> Self {
        Self {
            glyphs: Self::HIGHRES.chars().collect(),
            caps: Some(Self::DEFAULT_CAPS),
            max_width: None,
        }
    }
}

impl Bar {
    /// Glyph ramps run from fullest to emptiest.
    pub const HIGHRES: &'static str = "█▉▊▋▌▍▎▏ ";
    pub const SIMPLE: &'static str = "≡> ";
    pub const DEFAULT_CAPS: (char, char) = ('[', ']');

    /// Bar with a custom glyph ramp (at least a full and an empty glyph).
    pub fn with_glyphs(glyphs: &str) -> Result<Self, ProgressError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.len() < 2 {
            return Err(ProgressError::Ramp(glyphs.len()));
        }
        Ok(Self {
            glyphs,
            ..Self::default()
        })
    }

    pub fn caps(mut self, caps: Option<(char, char)>) -> Self {
        self.caps = caps;
        self
    }

    pub fn max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }

    fn full(&self) -> char {
        self.glyphs[0]
    }

    fn empty(&self) -> char {
        self.glyphs[self.glyphs.len() - 1]
    }

    fn partials(&self) -> &[char] {
        &self.glyphs[1..self.glyphs.len() - 1]
    }
}

impl Widget for Bar {
    fn render(&self, width: usize, state: &BatchSnapshot) -> String {
        let width = self.max_width.map_or(width, |m| m.min(width));
        let inner = match self.caps {
            Some(_) if width < 2 => return String::new(),
            Some(_) => width - 2,
            None => width,
        };

        let done = state.num_done.min(state.num_total);
        let (whole, rem) = if state.num_total == 0 {
            (0, 0)
        } else {
            let scaled = inner * done;
            (scaled / state.num_total, scaled % state.num_total)
        };

        let mut bar = String::with_capacity(width * 3);
        if let Some((open, _)) = self.caps {
            bar.push(open);
        }
        bar.extend(std::iter::repeat(self.full()).take(whole));
        if whole < inner {
            let partials = self.partials();
            let partial = if rem == 0 || partials.is_empty() {
                self.empty()
            } else {
                // Indexed from the emptiest end of the ramp.
                let index = rem * partials.len() / state.num_total;
                partials[partials.len() - 1 - index]
            };
            bar.push(partial);
            bar.extend(std::iter::repeat(self.empty()).take(inner - whole - 1));
        }
        if let Some((_, close)) = self.caps {
            bar.push(close);
        }
        bar
    }
}
