//! Pointer gesture recognition for list rows.

mod drag;

pub use drag::{DragConfig, DragPhase, DragRelease, DragState};
