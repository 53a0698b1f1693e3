//! Capabilities the views consume: settings, notifications and messages.
//!
//! Each is a `Send + Sync` trait so work can be handed to the blocking pool
//! while the frame thread keeps rendering.

pub mod notifications;
pub mod settings;
pub mod source;

use std::sync::Arc;

pub use notifications::{notify_in_background, NotificationStatus, Notifier, SystemNotifier};
pub use settings::{persist_in_background, FileSettings, Identity, Settings, SettingsService};
pub use source::{MemorySource, MessageSource, Subscription};

/// Handles to every service, cloned into the views that need them.
#[derive(Clone)]
pub struct Services {
    pub settings: Arc<dyn SettingsService>,
    pub notifier: Arc<dyn Notifier>,
    pub source: Arc<dyn MessageSource>,
}

impl Services {
    pub fn new(
        settings: Arc<dyn SettingsService>,
        notifier: Arc<dyn Notifier>,
        source: Arc<dyn MessageSource>,
    ) -> Self {
        Self {
            settings,
            notifier,
            source,
        }
    }

    /// In-memory services with the given settings and messages.
    pub fn in_memory(settings: Settings, records: Vec<crate::models::MessageRecord>) -> Self {
        Self::new(
            Arc::new(FileSettings::in_memory(settings)),
            Arc::new(SystemNotifier),
            Arc::new(MemorySource::with_records(records)),
        )
    }
}
