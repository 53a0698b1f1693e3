//! The screens of the app and how they are wired into the view manager.

pub mod compose;
pub mod consent;
pub mod forms;
pub mod replies;
pub mod settings;

pub use compose::ComposeView;
pub use consent::ConsentView;
pub use forms::{ConnectFormView, IdentityFormView};
pub use replies::RepliesView;
pub use settings::{SettingsControl, SettingsView};

use std::sync::Arc;

use crate::config::UiConfig;
use crate::error::NavigationError;
use crate::navigation::{ViewId, ViewManager};
use crate::services::{Services, Settings};

/// Version of the first-run notice. Bump to show it again.
pub const NOTICE_VERSION: u32 = 1;

/// Where startup lands given the current settings: the notice, then the
/// connect form, then the identity form, then the message list.
pub fn initial_view(settings: &Settings) -> ViewId {
    if settings.acknowledged_notice_version < NOTICE_VERSION {
        ViewId::Consent
    } else if settings.address.trim().is_empty() {
        ViewId::ConnectForm
    } else if settings.identity.is_none() {
        ViewId::IdentityForm
    } else {
        ViewId::Replies
    }
}

/// Register one instance of every view.
pub fn register_views(
    manager: &mut ViewManager,
    services: &Services,
    ui: &UiConfig,
) -> Result<(), NavigationError> {
    manager.register(
        ViewId::Consent,
        Box::new(ConsentView::new(Arc::clone(&services.settings))),
    )?;
    manager.register(
        ViewId::ConnectForm,
        Box::new(ConnectFormView::new(Arc::clone(&services.settings))),
    )?;
    manager.register(
        ViewId::IdentityForm,
        Box::new(IdentityFormView::new(Arc::clone(&services.settings))),
    )?;
    manager.register(
        ViewId::Settings,
        Box::new(SettingsView::new(
            Arc::clone(&services.settings),
            Arc::clone(&services.notifier),
        )),
    )?;
    manager.register(
        ViewId::Replies,
        Box::new(RepliesView::new(
            Arc::clone(&services.source),
            ui.row_config(),
            ui.max_row_width,
        )),
    )?;
    manager.register(
        ViewId::Compose,
        Box::new(ComposeView::new(
            Arc::clone(&services.source),
            Arc::clone(&services.settings),
        )),
    )?;
    Ok(())
}
