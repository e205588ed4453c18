//! Layout of widgets into one fixed-width line.

use std::io::{self, Write};
use std::time::Duration;

use crate::batch::BatchSnapshot;

use super::error::ProgressError;
use super::terminal::{terminal_width, FALLBACK_WIDTH};
use super::widget::Widget;

const PLACEHOLDER: &str = "{}";

/// Which segment claims width first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillDirection {
    /// Left segment renders against the full width; the right gets what is left.
    #[default]
    LeftToRight,
    /// Right segment renders first; the left gets what is left.
    RightToLeft,
}

/// Literal text around a side's widgets: `literals.len() == widgets.len() + 1`.
struct Segment {
    literals: Vec<String>,
    widgets: Vec<Box<dyn Widget>>,
}

impl Segment {
    fn new(
        side: &'static str,
        widgets: Vec<Box<dyn Widget>>,
        template: Option<&str>,
    ) -> Result<Self, ProgressError> {
        let literals: Vec<String> = match template {
            Some(t) => t.split(PLACEHOLDER).map(str::to_string).collect(),
            None if widgets.is_empty() => vec![String::new()],
            None => {
                let mut l = vec![" ".to_string(); widgets.len() + 1];
                l[0].clear();
                l[widgets.len()].clear();
                l
            }
        };
        let placeholders = literals.len() - 1;
        if placeholders != widgets.len() {
            return Err(ProgressError::Template {
                side,
                placeholders,
                widgets: widgets.len(),
            });
        }
        Ok(Self { literals, widgets })
    }

    /// Leftmost widget first; each widget gets whatever is left of `width`.
    fn render_forward(&self, width: usize, state: &BatchSnapshot) -> String {
        let mut out = String::new();
        let mut used = 0;
        for (literal, widget) in self.literals.iter().zip(&self.widgets) {
            out.push_str(literal);
            used += char_len(literal);
            let available = width.saturating_sub(used);
            let piece = clip(widget.render(available, state), available);
            used += char_len(&piece);
            out.push_str(&piece);
        }
        out.push_str(&self.literals[self.widgets.len()]);
        clip(out, width)
    }

    /// Rightmost (outermost) widget first, consuming the literal to its right
    /// before it.
    fn render_backward(&self, width: usize, state: &BatchSnapshot) -> String {
        let n = self.widgets.len();
        let mut pieces: Vec<String> = Vec::with_capacity(2 * n + 1);
        let mut used = char_len(&self.literals[n]);
        pieces.push(self.literals[n].clone());
        for i in (0..n).rev() {
            let available = width.saturating_sub(used);
            let piece = clip(self.widgets[i].render(available, state), available);
            used += char_len(&piece);
            pieces.push(piece);
            used += char_len(&self.literals[i]);
            pieces.push(self.literals[i].clone());
        }
        pieces.reverse();
        clip(pieces.concat(), width)
    }

    fn update_interval(&self) -> Option<Duration> {
        self.widgets.iter().filter_map(|w| w.update_interval()).min()
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn clip(s: String, width: usize) -> String {
    if char_len(&s) <= width {
        s
    } else {
        s.chars().take(width).collect()
    }
}

/// A progress line: left-aligned widgets, right-aligned widgets, padding between.
pub struct ProgressRenderer {
    left: Segment,
    right: Segment,
    width: Option<usize>,
    direction: FillDirection,
}

impl ProgressRenderer {
    pub fn builder() -> ProgressRendererBuilder {
        ProgressRendererBuilder::default()
    }

    /// Explicit width if configured, else the terminal's, else 80.
    pub fn width(&self) -> usize {
        self.width
            .or_else(terminal_width)
            .unwrap_or(FALLBACK_WIDTH)
    }

    /// Smallest redraw period any widget asked for.
    pub fn update_interval(&self) -> Option<Duration> {
        match (self.left.update_interval(), self.right.update_interval()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Render one line, exactly `width()` chars wide (less only if the
    /// literals alone overflow).
    pub fn render(&self, state: &BatchSnapshot) -> String {
        let total = self.width();
        let (left, right) = match self.direction {
            FillDirection::LeftToRight => {
                let left = self.left.render_forward(total, state);
                let right = self
                    .right
                    .render_backward(total.saturating_sub(char_len(&left)), state);
                (left, right)
            }
            FillDirection::RightToLeft => {
                let right = self.right.render_backward(total, state);
                let left = self
                    .left
                    .render_forward(total.saturating_sub(char_len(&right)), state);
                (left, right)
            }
        };
        let pad = total.saturating_sub(char_len(&left) + char_len(&right));
        format!("{}{}{}", left, " ".repeat(pad), right)
    }

    /// Redraw in place (`\r` + line); the final frame ends the line.
    pub fn draw<W: Write>(&self, out: &mut W, state: &BatchSnapshot) -> io::Result<()> {
        write!(out, "\r{}", self.render(state))?;
        if state.is_complete() {
            writeln!(out)?;
        }
        out.flush()
    }

    /// Adapter for [`crate::batch::BatchExecutor::run_with_monitor`].
    pub fn monitor<'a, W: Write + 'a>(&'a self, mut out: W) -> impl FnMut(&BatchSnapshot) + 'a {
        move |state| {
            if let Err(e) = self.draw(&mut out, state) {
                tracing::debug!("progress draw failed: {}", e);
            }
        }
    }
}

/// Builder for [`ProgressRenderer`]; templates are checked in [`build`](Self::build).
#[derive(Default)]
pub struct ProgressRendererBuilder {
    left: Vec<Box<dyn Widget>>,
    right: Vec<Box<dyn Widget>>,
    left_template: Option<String>,
    right_template: Option<String>,
    width: Option<usize>,
    direction: FillDirection,
}

impl ProgressRendererBuilder {
    pub fn left(mut self, widgets: Vec<Box<dyn Widget>>) -> Self {
        self.left = widgets;
        self
    }

    pub fn right(mut self, widgets: Vec<Box<dyn Widget>>) -> Self {
        self.right = widgets;
        self
    }

    /// Literal text with one `{}` per left widget.
    pub fn left_template(mut self, template: impl Into<String>) -> Self {
        self.left_template = Some(template.into());
        self
    }

    /// Literal text with one `{}` per right widget.
    pub fn right_template(mut self, template: impl Into<String>) -> Self {
        self.right_template = Some(template.into());
        self
    }

    /// Fixed line width instead of the terminal width.
    pub fn width(mut self, width: Option<usize>) -> Self {
        self.width = width;
        self
    }

    pub fn direction(mut self, direction: FillDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn build(self) -> Result<ProgressRenderer, ProgressError> {
        Ok(ProgressRenderer {
            left: Segment::new("left", self.left, self.left_template.as_deref())?,
            right: Segment::new("right", self.right, self.right_template.as_deref())?,
            width: self.width,
            direction: self.direction,
        })
    }
}
