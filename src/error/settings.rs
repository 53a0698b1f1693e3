//! Settings storage errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or persisting settings.
///
/// Persist failures are logged; the in-memory settings remain authoritative
/// until the next successful persist.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SettingsError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SettingsError::Read { .. } => "E_SETTINGS_READ",
            SettingsError::Write { .. } => "E_SETTINGS_WRITE",
            SettingsError::Malformed { .. } => "E_SETTINGS_MALFORMED",
            SettingsError::Encode(_) => "E_SETTINGS_ENCODE",
        }
    }
}
