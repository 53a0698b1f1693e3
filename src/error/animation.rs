//! Animation parameter errors.

use thiserror::Error;

/// Degenerate animation parameters, recovered by treating the animation as
/// already complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error("animation duration must be positive, got {duration_ms}ms")]
    NonPositiveDuration { duration_ms: i64 },
}

impl AnimationError {
    pub fn error_code(&self) -> &'static str {
        "E_ANIM_DEGENERATE"
    }
}
