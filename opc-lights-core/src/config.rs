use std::time::Duration;

use crate::errors::{OpcError, OpcResult};

pub const DEFAULT_FRAMES_PER_SECOND: f32 = 120.0;

/// The OPC port that every server listens on unless told otherwise.
pub const DEFAULT_OPC_PORT: u16 = 7890;

/// 60 LEDs on each of the 32 strips
pub const DEFAULT_WIDTH: usize = 60;
pub const DEFAULT_HEIGHT: usize = 32;

/// How fast the render loop should run. Build it once at startup and hand it to the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacingConfig {
    frames_per_second: f32,
    frame_budget: Duration,
}

impl PacingConfig {
    /// zero, negative, non-finite, and absurdly small rates are rejected here instead of dividing by zero later
    pub fn new(frames_per_second: f32) -> OpcResult<Self> {
        if !frames_per_second.is_finite() || frames_per_second <= 0.0 {
            return Err(OpcError::InvalidFrameRate(frames_per_second));
        }

        // tiny rates make a budget too long for a Duration
        let frame_budget = Duration::try_from_secs_f64(1.0 / frames_per_second as f64)
            .map_err(|_| OpcError::InvalidFrameRate(frames_per_second))?;

        Ok(Self {
            frames_per_second,
            frame_budget,
        })
    }

    pub fn frames_per_second(&self) -> f32 {
        self.frames_per_second
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// How long to sleep after a tick that took `elapsed`. Late ticks get zero, not a negative sleep.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.frame_budget.saturating_sub(elapsed)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMES_PER_SECOND).expect("the default frame rate is positive")
    }
}

pub struct NoiseConfig {
    /// scales the row coordinate before sampling. bigger is smoother
    pub freq_y: f64,
    /// scales the column coordinate before sampling
    pub freq_x: f64,
    /// noise-time units per second
    pub speed: f64,
    pub seed: u32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            freq_y: 16.0,
            freq_x: 16.0,
            speed: 0.5,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::PacingConfig;
    use crate::errors::OpcError;

    #[test]
    fn test_frame_budget() {
        let pacing = PacingConfig::new(120.0).unwrap();

        assert_eq!(pacing.frames_per_second(), 120.0);

        let budget = pacing.frame_budget().as_secs_f64();
        assert!((budget - 1.0 / 120.0).abs() < 1e-9, "{budget}");
    }

    #[test]
    fn test_bad_frame_rates() {
        for fps in [0.0, -1.0, f32::NAN, f32::INFINITY, 1e-30, f32::MIN_POSITIVE] {
            assert!(matches!(
                PacingConfig::new(fps),
                Err(OpcError::InvalidFrameRate(_))
            ));
        }
    }

    #[test]
    fn test_slow_but_valid_frame_rate() {
        // one frame a minute
        let pacing = PacingConfig::new(1.0 / 60.0).unwrap();

        let budget = pacing.frame_budget().as_secs_f64();
        assert!((budget - 60.0).abs() < 1e-3, "{budget}");
    }

    #[test]
    fn test_remaining() {
        let pacing = PacingConfig::new(10.0).unwrap();

        assert_eq!(
            pacing.remaining(Duration::from_millis(30)),
            Duration::from_millis(70)
        );
        assert_eq!(pacing.remaining(Duration::from_millis(100)), Duration::ZERO);
        assert_eq!(pacing.remaining(Duration::from_millis(250)), Duration::ZERO);
    }
}
