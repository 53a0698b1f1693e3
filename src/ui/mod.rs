//! UI rendering for twig
//!
//! - `theme` - dark and light palettes
//! - `text` - width-aware wrapping and truncation
//! - `arena` / `row` - per-row animation state and the animated row renderer
//! - `widgets` - text fields, switches and buttons used by the forms
//! - `chrome` - app bar and nav entries
//! - `overlay` - profiling and theme overlays

pub mod arena;
pub mod chrome;
pub mod overlay;
pub mod row;
pub mod text;
pub mod theme;
pub mod widgets;

pub use arena::{RowArena, RowConfig, RowSlot};
pub use chrome::{ChromeLayout, ChromeModel};
pub use row::{render_row, reveal_inset, RowLayout};
pub use theme::Theme;
pub use widgets::{FieldAction, TextField};
