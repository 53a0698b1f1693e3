//! Error handling for twig.
//!
//! Each concern owns its error enum; `TwigError` unifies them and classifies
//! them into an [`ErrorCategory`]:
//!
//! | Category | Raised by | Policy |
//! |----------|-----------|--------|
//! | Configuration | duplicate view registration | abort startup |
//! | Gesture | pointer-up without pointer-down | drop the sample, log |
//! | Animation | non-positive duration | skip the animation |
//! | Settings | persist failure | log, keep in-memory state |
//! | Notification | test notification failed | show as text |
//! | Source | submit failure | show on compose screen |
//!
//! Errors raised inside a single row never travel beyond that row.

mod animation;
mod category;
mod gesture;
mod navigation;
mod notification;
mod result;
mod settings;
mod source;
mod twig_error;

pub use animation::AnimationError;
pub use category::ErrorCategory;
pub use gesture::GestureError;
pub use navigation::NavigationError;
pub use notification::NotificationError;
pub use result::TwigResult;
pub use settings::SettingsError;
pub use source::SourceError;
pub use twig_error::TwigError;
