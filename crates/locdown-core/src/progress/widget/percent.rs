use crate::batch::BatchSnapshot;

use super::{Padding, Widget};

/// Whole-number percentage complete, e.g. `42%`.
///
/// An empty batch (`num_total == 0`) renders as `0%`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Percent {
    padding: Padding,
}

impl Percent {
    pub fn new(padding: Padding) -> Self {
        Self { padding }
    }
}

impl Widget for Percent {
    fn render(&self, _width: usize, state: &BatchSnapshot) -> String {
        let value = if state.num_total == 0 {
            0
        } else {
            100 * state.num_done.min(state.num_total) / state.num_total
        };
        format!("{}%", self.padding.pad(value, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_percentage() {
        let w = Percent::default();
        assert_eq!(w.render(80, &BatchSnapshot::new(1, 3)), "33%");
        assert_eq!(w.render(80, &BatchSnapshot::new(2, 3)), "66%");
        assert_eq!(w.render(80, &BatchSnapshot::new(3, 3)), "100%");
    }

    #[test]
    fn empty_batch_is_zero_percent() {
        assert_eq!(Percent::default().render(80, &BatchSnapshot::new(0, 0)), "0%");
        assert_eq!(
            Percent::new(Padding::Spaces).render(80, &BatchSnapshot::new(0, 0)),
            "  0%"
        );
    }

    #[test]
    fn padded_percentage() {
        let w = Percent::new(Padding::Zeros);
        assert_eq!(w.render(80, &BatchSnapshot::new(1, 20)), "005%");
    }
}
