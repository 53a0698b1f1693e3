//! Horizontal drag tracking for the reply gesture.
//!
//! Each row owns one [`DragState`]. Pointer samples move it through
//!
//! ```text
//! Idle --down--> Dragging --up/cancel--> Releasing --(resolved)--> Idle
//!                  ^  |
//!                  +--+ move
//! ```
//!
//! A release past the trigger threshold resolves immediately: the offset
//! snaps to zero and [`DragRelease::Reply`] is returned. A shorter release
//! (or any cancel) eases the offset back to zero over the settle duration,
//! after which the next [`DragState::sample`] returns the row to `Idle`.
//! Phases are never revisited out of order: presses are ignored until the
//! settle finishes.

use std::time::Instant;

use crate::animation::{AnimationClock, Easing};
use crate::error::GestureError;

/// Lifecycle phase of a row's drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Releasing,
}

/// How a pointer-up resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRelease {
    /// The offset crossed the threshold; the owner should emit a reply intent.
    Reply,
    /// The offset is easing back to zero.
    Settling,
}

/// Tuning for the reply gesture, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Maximum visual offset in either direction.
    pub clamp: f32,
    /// Offset magnitude at which a release triggers a reply.
    pub threshold: f32,
    /// Duration of the snap-back after a short release.
    pub settle_ms: i64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            clamp: 12.0,
            threshold: 8.0,
            settle_ms: 150,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DragState {
    phase: DragPhase,
    offset: f32,
    /// Cells per second, from the last two samples.
    velocity: f32,
    start_x: f32,
    last_x: f32,
    last_sample: Option<Instant>,
    settle: Option<AnimationClock>,
    settle_from: f32,
    config: DragConfig,
}

impl Default for DragState {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragState {
    pub fn new(config: DragConfig) -> Self {
        Self {
            phase: DragPhase::Idle,
            offset: 0.0,
            velocity: 0.0,
            start_x: 0.0,
            last_x: 0.0,
            last_sample: None,
            settle: None,
            settle_from: 0.0,
            config,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// The offset as of the last sample. Use [`DragState::sample`] when
    /// rendering so a settle can progress.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Pointer pressed inside the row. Returns false if the press was
    /// ignored because a gesture is still in flight.
    pub fn pointer_down(&mut self, x: u16, now: Instant) -> bool {
        if self.phase != DragPhase::Idle {
            tracing::debug!(phase = ?self.phase, "ignoring press during active gesture");
            return false;
        }
        let x = f32::from(x);
        self.phase = DragPhase::Dragging;
        self.start_x = x;
        self.last_x = x;
        self.offset = 0.0;
        self.velocity = 0.0;
        self.last_sample = Some(now);
        true
    }

    /// Pointer moved while pressed. Returns the new clamped offset.
    pub fn pointer_move(&mut self, x: u16, now: Instant) -> Result<f32, GestureError> {
        if self.phase != DragPhase::Dragging {
            return Err(GestureError::MoveWithoutPress(self.phase));
        }
        let x = f32::from(x);
        let clamp = self.config.clamp.max(0.0);
        self.offset = (x - self.start_x).clamp(-clamp, clamp);

        if let Some(last) = self.last_sample {
            let dt = now.saturating_duration_since(last).as_secs_f32();
            if dt > 0.0 {
                self.velocity = (x - self.last_x) / dt;
            }
        }
        self.last_x = x;
        self.last_sample = Some(now);
        Ok(self.offset)
    }

    /// Pointer released. Resolves the gesture synchronously.
    pub fn pointer_up(&mut self, now: Instant) -> Result<DragRelease, GestureError> {
        if self.phase != DragPhase::Dragging {
            return Err(GestureError::ReleaseWithoutPress(self.phase));
        }
        self.phase = DragPhase::Releasing;
        if self.offset.abs() >= self.config.threshold {
            self.reset();
            Ok(DragRelease::Reply)
        } else {
            self.begin_settle(now);
            Ok(DragRelease::Settling)
        }
    }

    /// The platform cancelled the pointer. Never triggers a reply.
    pub fn pointer_cancel(&mut self, now: Instant) -> Result<(), GestureError> {
        if self.phase != DragPhase::Dragging {
            return Err(GestureError::ReleaseWithoutPress(self.phase));
        }
        self.phase = DragPhase::Releasing;
        self.begin_settle(now);
        Ok(())
    }

    /// Force an in-flight drag into release with no trigger effect. Used
    /// when the owning view is hidden. No-op unless dragging.
    pub fn cancel(&mut self, now: Instant) {
        if self.phase == DragPhase::Dragging {
            tracing::debug!(offset = self.offset, "cancelling drag");
            self.phase = DragPhase::Releasing;
            self.begin_settle(now);
        }
    }

    /// Offset to render at `now`, advancing a pending settle. Completes the
    /// `Releasing -> Idle` transition once the settle has finished.
    pub fn sample(&mut self, now: Instant) -> f32 {
        match self.phase {
            DragPhase::Idle => 0.0,
            DragPhase::Dragging => self.offset,
            DragPhase::Releasing => {
                let Some(clock) = self.settle.as_mut() else {
                    self.reset();
                    return 0.0;
                };
                let progress = clock.progress(now);
                if clock.is_complete() {
                    self.reset();
                    0.0
                } else {
                    self.offset = self.settle_from * (1.0 - progress);
                    self.offset
                }
            }
        }
    }

    fn begin_settle(&mut self, now: Instant) {
        self.settle_from = self.offset;
        if self.offset == 0.0 || self.config.settle_ms <= 0 {
            self.reset();
            return;
        }
        self.settle = Some(AnimationClock::from_millis(
            now,
            self.config.settle_ms,
            Easing::EaseOutCubic,
        ));
    }

    fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.offset = 0.0;
        self.velocity = 0.0;
        self.last_sample = None;
        self.settle = None;
        self.settle_from = 0.0;
    }
}
