//! Navigation registry errors.

use thiserror::Error;

use crate::navigation::ViewId;

/// Errors raised while wiring the view registry.
///
/// These are configuration mistakes: the binary aborts startup on them
/// instead of running with an inconsistent registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// A second view was registered under an id that is already taken.
    #[error("view {0:?} is already registered")]
    DuplicateView(ViewId),

    /// Registration attempted after the first frame was produced.
    #[error("view {0:?} registered after startup; the registry is frozen")]
    RegistryFrozen(ViewId),

    /// A switch targeted an id nothing was registered under.
    #[error("no view registered for {0:?}")]
    UnknownView(ViewId),
}

impl NavigationError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NavigationError::DuplicateView(_) => "E_NAV_DUPLICATE",
            NavigationError::RegistryFrozen(_) => "E_NAV_FROZEN",
            NavigationError::UnknownView(_) => "E_NAV_UNKNOWN",
        }
    }
}
