//! Unified error type for the twig client.

use thiserror::Error;

use super::animation::AnimationError;
use super::category::ErrorCategory;
use super::gesture::GestureError;
use super::navigation::NavigationError;
use super::notification::NotificationError;
use super::settings::SettingsError;
use super::source::SourceError;

/// Unified error type consolidating every domain error.
#[derive(Debug, Error)]
pub enum TwigError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Gesture(#[from] GestureError),

    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Notification(#[from] NotificationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TwigError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            TwigError::Navigation(_) => ErrorCategory::Configuration,
            TwigError::Gesture(_) => ErrorCategory::Gesture,
            TwigError::Animation(_) => ErrorCategory::Animation,
            TwigError::Settings(_) => ErrorCategory::Settings,
            TwigError::Notification(_) => ErrorCategory::Notification,
            TwigError::Source(_) => ErrorCategory::Source,
            TwigError::Io(_) => ErrorCategory::System,
        }
    }

    /// Check if the application can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        self.category().is_recoverable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TwigError::Navigation(err) => err.error_code(),
            TwigError::Gesture(err) => err.error_code(),
            TwigError::Animation(err) => err.error_code(),
            TwigError::Settings(err) => err.error_code(),
            TwigError::Notification(err) => err.error_code(),
            TwigError::Source(err) => err.error_code(),
            TwigError::Io(_) => "E_SYS_IO",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            TwigError::Navigation(err) => format!("Startup failed: {}", err),
            TwigError::Gesture(_) | TwigError::Animation(_) => {
                "A visual glitch occurred and was ignored.".to_string()
            }
            TwigError::Settings(_) => {
                "Settings could not be saved. Your changes are kept for this session.".to_string()
            }
            TwigError::Notification(err) => format!("Failed: {}", err),
            TwigError::Source(err) => err.user_message(),
            TwigError::Io(err) => format!("System error: {}", err),
        }
    }
}
