//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the UI, so log lines go to a file in the data
//! directory, never to stdout or stderr.
//!
//! # Log Levels
//!
//! - `error`: switches to unregistered views
//! - `warn`: recovered row errors, failed persistence
//! - `info`: navigation transitions, settings persistence
//! - `debug`: per-gesture and per-click detail

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "TWIG_LOG";

/// Configuration for logging behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `twig::navigation=debug`.
    pub filter: String,
    /// File to append log lines to.
    pub log_file: PathBuf,
}

impl LogConfig {
    pub fn new(filter: impl Into<String>, log_file: impl Into<PathBuf>) -> Self {
        Self {
            filter: filter.into(),
            log_file: log_file.into(),
        }
    }

    /// Log to `twig.log` inside `data_dir`.
    pub fn in_dir(filter: impl Into<String>, data_dir: &Path) -> Self {
        Self::new(filter, data_dir.join("twig.log"))
    }
}

fn build_env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup. A second call leaves the first subscriber in
/// place.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(parent) = config.log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(&config.filter))
        .with(layer)
        .try_init();
    Ok(())
}
