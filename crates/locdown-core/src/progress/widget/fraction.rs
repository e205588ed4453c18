use crate::batch::BatchSnapshot;

use super::{Padding, Widget};

/// `done/total`, optionally padding `done` to the digit width of `total`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fraction {
    padding: Padding,
}

impl Fraction {
    pub fn new(padding: Padding) -> Self {
        Self { padding }
    }
}

impl Widget for Fraction {
    fn render(&self, _width: usize, state: &BatchSnapshot) -> String {
        let digits = state.num_total.to_string().len();
        format!(
            "{}/{}",
            self.padding.pad(state.num_done, digits),
            state.num_total
        )
    }
}
