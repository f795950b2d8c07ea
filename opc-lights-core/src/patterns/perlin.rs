use std::time::Duration;

use noise::{NoiseFn, Perlin};

use super::Pattern;
use crate::config::NoiseConfig;
use crate::lights::NOISE_SCALE;

/// Each channel samples a different part of the same noise field so that red, green, and blue don't move together.
pub const CHANNEL_OFFSETS: [f64; 3] = [0.0, 10_000.0, 20_000.0];

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct NoiseState {
    pub time: f64,
}

/// Slowly moving blobs of color from 3D noise. x and y come from the pixel and z is time.
pub struct NoisePattern<N> {
    noise: N,
    freq_y: f64,
    freq_x: f64,
    speed: f64,
}

impl NoisePattern<Perlin> {
    pub fn perlin(config: &NoiseConfig) -> Self {
        Self::new(Perlin::new(config.seed), config)
    }
}

impl<N: NoiseFn<f64, 3>> NoisePattern<N> {
    pub fn new(noise: N, config: &NoiseConfig) -> Self {
        Self {
            noise,
            freq_y: config.freq_y,
            freq_x: config.freq_x,
            speed: config.speed,
        }
    }

    /// The raw sample for one channel. Roughly -1..1.
    pub fn sample(&self, row: usize, col: usize, channel: usize, time: f64) -> f64 {
        let offset = CHANNEL_OFFSETS[channel];

        self.noise.get([
            row as f64 / self.freq_y + offset,
            col as f64 / self.freq_x + offset,
            time,
        ])
    }
}

impl<N: NoiseFn<f64, 3>> Pattern for NoisePattern<N> {
    type State = NoiseState;

    /// scaled in f64. the driver truncates to a byte when it clips
    fn pixel(&self, row: usize, col: usize, state: &NoiseState) -> [f64; 3] {
        [0, 1, 2].map(|c| self.sample(row, col, c, state.time) * NOISE_SCALE)
    }

    fn advance(&self, state: &mut NoiseState, frame_budget: Duration, _height: usize) {
        state.time += self.speed * frame_budget.as_secs_f64();
    }
}
