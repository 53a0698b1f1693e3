//! Error category classification for unified error handling.
//!
//! Categories decide how far an error is allowed to travel: configuration
//! mistakes abort startup, everything else is recovered where it happened.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Wiring mistakes made at startup (duplicate view registration).
    /// Never recovered.
    Configuration,

    /// Pointer input that does not fit the per-row gesture machine.
    /// Recovered inside the row.
    Gesture,

    /// Degenerate animation parameters. Recovered by skipping the animation.
    Animation,

    /// Settings storage failures. In-memory settings stay authoritative.
    Settings,

    /// Desktop notification delivery failures. Shown to the user.
    Notification,

    /// Message data source failures (empty drafts, unknown parents, IO).
    Source,

    /// OS level failures (filesystem, terminal).
    System,
}

impl ErrorCategory {
    /// Returns true if the application can keep running after an error
    /// in this category.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ErrorCategory::Configuration)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Gesture => "gesture",
            ErrorCategory::Animation => "animation",
            ErrorCategory::Settings => "settings",
            ErrorCategory::Notification => "notification",
            ErrorCategory::Source => "source",
            ErrorCategory::System => "system",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
