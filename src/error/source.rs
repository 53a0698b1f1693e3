//! Message data source errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::MessageId;

/// Failures while reading or writing messages.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("message content is empty")]
    EmptyMessage,

    #[error("cannot reply to unknown message {0}")]
    UnknownParent(MessageId),

    #[error("failed to access message store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("message store {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SourceError::EmptyMessage => "E_SOURCE_EMPTY",
            SourceError::UnknownParent(_) => "E_SOURCE_PARENT",
            SourceError::Io { .. } => "E_SOURCE_IO",
            SourceError::Malformed { .. } => "E_SOURCE_MALFORMED",
        }
    }

    /// Get a user-friendly error message for the compose screen.
    pub fn user_message(&self) -> String {
        match self {
            SourceError::EmptyMessage => "Type a message before sending.".to_string(),
            SourceError::UnknownParent(_) => {
                "The message you are replying to no longer exists.".to_string()
            }
            SourceError::Io { .. } | SourceError::Malformed { .. } => {
                "Could not save the message. Please try again.".to_string()
            }
        }
    }
}
