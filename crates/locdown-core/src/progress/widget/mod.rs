//! Widgets: self-contained renderers for one fragment of the progress line.

mod bar;
mod fraction;
mod percent;
mod spinner;

pub use bar::Bar;
pub use fraction::Fraction;
pub use percent::Percent;
pub use spinner::Spinner;

use std::time::Duration;

use crate::batch::BatchSnapshot;

/// One rendering unit of a progress line.
///
/// `render` must return at most `width` chars. The renderer clips longer
/// output, but a widget that relies on that is buggy.
pub trait Widget: Send + Sync {
    fn render(&self, width: usize, state: &BatchSnapshot) -> String;

    /// How often this widget wants to be redrawn (None = only on state change).
    fn update_interval(&self) -> Option<Duration> {
        None
    }
}

/// Left padding for numeric widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    #[default]
    None,
    Spaces,
    Zeros,
}

impl Padding {
    fn pad(self, value: usize, width: usize) -> String {
        match self {
            Padding::None => value.to_string(),
            Padding::Spaces => format!("{value:>width$}"),
            Padding::Zeros => format!("{value:0width$}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Padding;

    #[test]
    fn padding_styles() {
        assert_eq!(Padding::None.pad(7, 3), "7");
        assert_eq!(Padding::Spaces.pad(7, 3), "  7");
        assert_eq!(Padding::Zeros.pad(7, 3), "007");
        assert_eq!(Padding::Zeros.pad(1234, 3), "1234");
    }
}
