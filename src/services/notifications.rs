//! Native OS notifications.
//!
//! Uses `osascript` on macOS and `notify-send` elsewhere on unix. Dispatch
//! runs off the frame thread and the outcome is published as a display
//! string that the settings screen re-reads on its next frame.

use std::process::Command;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::error::{NotificationError, TwigError};

/// Result string shown after a successful test notification.
pub const SENT: &str = "Sent without errors";

pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotificationError>;
}

/// Shells out to the platform notification tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNotifier;

impl Notifier for SystemNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        let (program, mut command) = platform_command(title, body)?;
        let output = command
            .output()
            .map_err(|source| NotificationError::Spawn { program, source })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(NotificationError::Rejected { program, stderr });
        }
        debug!("OS notification sent via {}", program);
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn platform_command(title: &str, body: &str) -> Result<(&'static str, Command), NotificationError> {
    // Escape double quotes and backslashes for AppleScript string literals
    let escape = |s: &str| s.replace('\\', "\\\\").replace('"', "\\\"");
    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        escape(body),
        escape(title)
    );
    let mut command = Command::new("osascript");
    command.arg("-e").arg(script);
    Ok(("osascript", command))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_command(title: &str, body: &str) -> Result<(&'static str, Command), NotificationError> {
    let mut command = Command::new("notify-send");
    command.arg("--app-name=twig").arg(title).arg(body);
    Ok(("notify-send", command))
}

#[cfg(not(unix))]
fn platform_command(_title: &str, _body: &str) -> Result<(&'static str, Command), NotificationError> {
    Err(NotificationError::Unsupported)
}

/// Shared slot holding the latest notification outcome.
#[derive(Debug, Clone, Default)]
pub struct NotificationStatus {
    inner: Arc<Mutex<Option<String>>>,
}

impl NotificationStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn publish(&self, message: impl Into<String>) {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(message.into());
    }

    pub fn clear(&self) {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

/// Display string for a notification outcome.
pub fn outcome_message(result: Result<(), NotificationError>) -> String {
    match result {
        Ok(()) => SENT.to_string(),
        Err(e) => {
            warn!("Notification failed: {}", e);
            TwigError::from(e).user_message()
        }
    }
}

/// Send a notification without blocking the frame thread.
///
/// The outcome is published into `status`. Without a tokio runtime the
/// notifier runs inline.
pub fn notify_in_background(
    notifier: Arc<dyn Notifier>,
    title: String,
    body: String,
    status: NotificationStatus,
) {
    let job = move || {
        let message = outcome_message(notifier.notify(&title, &body));
        status.publish(message);
    };
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(job);
        }
        Err(_) => job(),
    }
}
