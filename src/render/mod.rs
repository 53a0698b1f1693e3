//! Drawing substrate used by animated rows and chrome.
//!
//! - [`RowRecording`]: draw offscreen once, replay with a translation
//! - [`Bounds`]: signed rectangles for content that may sit partly off-screen
//! - [`HitRegistry`]: pointer hit regions published during render

mod bounds;
mod hit;
mod recording;

pub use bounds::Bounds;
pub use hit::{HitRegion, HitRegistry, HitTarget};
pub use recording::RowRecording;
