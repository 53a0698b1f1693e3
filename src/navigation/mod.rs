//! View navigation: identifiers, intents, the view capability and the
//! manager that switches between views.

mod id;
mod intent;
mod manager;
mod navigator;
mod view;

pub use id::ViewId;
pub use intent::{Intent, Payload};
pub use manager::{BackNavigation, ViewManager};
pub use navigator::{Navigator, Overlays, PendingSwitch};
pub use view::{BarAction, NavEntry, View, ViewFrame, ViewInput};
