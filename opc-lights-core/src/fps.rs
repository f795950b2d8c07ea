use crate::logging::info;

use std::time::{Duration, Instant};

/// Counts frames and logs the achieved frame rate about once a second.
pub struct FpsTracker {
    last: Instant,
    count: u64,
}

impl Default for FpsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsTracker {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            count: 0,
        }
    }

    /// Returns the measured rate whenever a full second has been counted.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f32> {
        self.count += 1;
        let elapsed = now.duration_since(self.last);

        if elapsed < Duration::from_secs(1) {
            return None;
        }

        let fps = self.count as f32 / elapsed.as_secs_f32();

        self.count = 0;
        self.last = now;

        info!("FPS: {:.1}", fps);

        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::FpsTracker;

    #[test_log::test]
    fn test_reports_once_a_second() {
        let start = Instant::now();

        let mut tracker = FpsTracker {
            last: start,
            count: 0,
        };

        for i in 1..50 {
            assert_eq!(tracker.tick_at(start + Duration::from_millis(i * 20)), None);
        }

        let fps = tracker.tick_at(start + Duration::from_secs(1)).unwrap();
        assert!((fps - 50.0).abs() < 0.01, "{fps}");

        // the counter starts over
        assert_eq!(tracker.count, 0);
        assert_eq!(
            tracker.tick_at(start + Duration::from_millis(1020)),
            None
        );
    }
}
