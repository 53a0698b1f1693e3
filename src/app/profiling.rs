//! Frame timing for the profiling overlay.

use std::time::Duration;

/// Rolling frame statistics.
///
/// The average is an exponential moving average so a single slow frame
/// shows up without dominating the readout for long.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u64,
    last: Duration,
    average: Duration,
}

/// Weight of the newest frame in the moving average.
const SMOOTHING: f64 = 0.1;

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how long the last frame took to render.
    pub fn record(&mut self, elapsed: Duration) {
        self.frames += 1;
        self.last = elapsed;
        self.average = if self.frames == 1 {
            elapsed
        } else {
            let avg = self.average.as_secs_f64();
            Duration::from_secs_f64(avg + (elapsed.as_secs_f64() - avg) * SMOOTHING)
        };
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last(&self) -> Duration {
        self.last
    }

    pub fn average(&self) -> Duration {
        self.average
    }
}
