//! Per-row gesture errors.

use thiserror::Error;

use crate::gesture::DragPhase;

/// Pointer samples that do not fit the drag state machine.
///
/// Always recovered locally: the sample is dropped and the row keeps its
/// current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GestureError {
    /// Pointer-up or cancel arrived without a matching pointer-down.
    #[error("pointer released while row was {0:?}")]
    ReleaseWithoutPress(DragPhase),

    /// Pointer-move arrived while the row was not being dragged.
    #[error("pointer moved while row was {0:?}")]
    MoveWithoutPress(DragPhase),
}

impl GestureError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            GestureError::ReleaseWithoutPress(_) => "E_GESTURE_RELEASE",
            GestureError::MoveWithoutPress(_) => "E_GESTURE_MOVE",
        }
    }
}
