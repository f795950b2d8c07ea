//! Ideas for more patterns:
//! - fire that rises from the bottom row
//! - a rainbow that scrolls with the noise time

mod perlin;
mod scan;

pub use perlin::{CHANNEL_OFFSETS, NoisePattern, NoiseState};
pub use scan::{SCAN_COLOR, ScanPattern, ScanState};

use std::time::Duration;

/// Something that can color every pixel of a frame from a little bit of state.
pub trait Pattern {
    type State: Default;

    /// Channel levels for one pixel, before they are clipped into bytes. This must only depend on its arguments.
    fn pixel(&self, row: usize, col: usize, state: &Self::State) -> [f64; 3];

    /// Called exactly once per frame, after the frame is rendered.
    fn advance(&self, state: &mut Self::State, frame_budget: Duration, height: usize);
}
