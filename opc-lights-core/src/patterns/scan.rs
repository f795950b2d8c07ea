use std::time::Duration;

use smart_leds::RGB8;

use super::Pattern;

/// a dim blue
pub const SCAN_COLOR: RGB8 = RGB8 { r: 0, g: 0, b: 100 };

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanState {
    /// the row that is lit this frame
    pub row: usize,
}

/// Light one row at a time, top to bottom, then start over.
pub struct ScanPattern {
    color: RGB8,
}

impl Default for ScanPattern {
    fn default() -> Self {
        Self::new(SCAN_COLOR)
    }
}

impl ScanPattern {
    pub fn new(color: RGB8) -> Self {
        Self { color }
    }
}

impl Pattern for ScanPattern {
    type State = ScanState;

    fn pixel(&self, row: usize, _col: usize, state: &ScanState) -> [f64; 3] {
        if row == state.row {
            [self.color.r, self.color.g, self.color.b].map(f64::from)
        } else {
            [0.0; 3]
        }
    }

    fn advance(&self, state: &mut ScanState, _frame_budget: Duration, height: usize) {
        state.row = (state.row + 1) % height;
    }
}
