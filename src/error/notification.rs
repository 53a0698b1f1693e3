//! Desktop notification errors.

use thiserror::Error;

/// Failures reported by a notification backend.
///
/// Surfaced to the user as a string on the settings screen and never
/// retried automatically.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Notifications are turned off in settings.
    #[error("notifications are disabled")]
    Disabled,

    /// The platform has no supported notification mechanism.
    #[error("notifications are not supported on this platform")]
    Unsupported,

    /// The helper process could not be started.
    #[error("could not run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The helper process ran but reported failure.
    #[error("{program} exited with an error: {stderr}")]
    Rejected {
        program: &'static str,
        stderr: String,
    },
}

impl NotificationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            NotificationError::Disabled => "E_NOTIFY_DISABLED",
            NotificationError::Unsupported => "E_NOTIFY_UNSUPPORTED",
            NotificationError::Spawn { .. } => "E_NOTIFY_SPAWN",
            NotificationError::Rejected { .. } => "E_NOTIFY_REJECTED",
        }
    }
}
