//! Time-based animation primitives.
//!
//! - [`AnimationClock`] - eased progress toward 1.0 over a fixed duration
//! - [`Easing`] - the curves a clock can apply

mod clock;
mod easing;

pub use clock::AnimationClock;
pub use easing::Easing;
