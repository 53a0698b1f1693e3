//! Per-item animation clock.
//!
//! An [`AnimationClock`] is a pure function of elapsed time: given the
//! current instant it reports eased progress in `[0, 1]`. The only mutation
//! is latching `complete` once progress first reaches 1, so a finished
//! animation never needs its timing recomputed.

use std::time::{Duration, Instant};

use super::Easing;
use crate::error::AnimationError;

#[derive(Debug, Clone)]
pub struct AnimationClock {
    start: Instant,
    duration: Duration,
    easing: Easing,
    complete: bool,
}

impl AnimationClock {
    /// Start an animation at `start` running for `duration`.
    ///
    /// A zero duration yields a clock that is complete from the start.
    pub fn new(start: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            duration,
            easing,
            complete: duration.is_zero(),
        }
    }

    /// Build a clock from a signed millisecond duration as found in
    /// configuration. Non-positive durations are logged and produce an
    /// already-complete clock.
    pub fn from_millis(start: Instant, duration_ms: i64, easing: Easing) -> Self {
        if duration_ms <= 0 {
            let err = AnimationError::NonPositiveDuration { duration_ms };
            tracing::debug!(code = err.error_code(), "{}; skipping animation", err);
            return Self::settled(start);
        }
        Self::new(start, Duration::from_millis(duration_ms as u64), easing)
    }

    /// A clock that has already finished. Used for rows that were present
    /// before the view first loaded, which must not animate retroactively.
    pub fn settled(start: Instant) -> Self {
        Self {
            start,
            duration: Duration::ZERO,
            easing: Easing::Linear,
            complete: true,
        }
    }

    /// Linear time fraction `(now - start) / duration`, clamped to `[0, 1]`.
    pub fn linear_progress(&self, now: Instant) -> f32 {
        if self.complete || self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Eased progress at `now`. Latches completion once it reaches 1.
    pub fn progress(&mut self, now: Instant) -> f32 {
        let t = self.linear_progress(now);
        if t >= 1.0 {
            self.complete = true;
            return 1.0;
        }
        self.easing.apply(t)
    }

    /// Eased progress without latching.
    pub fn peek(&self, now: Instant) -> f32 {
        let t = self.linear_progress(now);
        if t >= 1.0 {
            1.0
        } else {
            self.easing.apply(t)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start(&self) -> Instant {
        self.start
    }
}
