//! Application configuration.
//!
//! [`AppConfig`] says where twig keeps its files and how the host loop
//! behaves; [`UiConfig`] holds the animation and gesture constants.
//!
//! # Example
//!
//! ```
//! use twig::config::AppConfig;
//!
//! let config = AppConfig::default()
//!     .with_data_dir("/tmp/twig")
//!     .with_invalidate(true);
//! assert_eq!(config.settings_path(), std::path::PathBuf::from("/tmp/twig/settings.json"));
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::animation::Easing;
use crate::cli::RunOptions;
use crate::gesture::DragConfig;
use crate::logging::{LogConfig, LOG_ENV};
use crate::ui::RowConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TWIG_DATA_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory for settings, messages and the log file.
    pub data_dir: PathBuf,
    /// Redraw on every tick.
    pub invalidate: bool,
    /// Tracing filter directive (default: info).
    pub log_filter: String,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            invalidate: false,
            log_filter: "info".to_string(),
            ui: UiConfig::default(),
        }
    }
}

/// `<platform data dir>/twig`, or `./.twig` if the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("twig"))
        .unwrap_or_else(|| PathBuf::from(".twig"))
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_invalidate(mut self, invalidate: bool) -> Self {
        self.invalidate = invalidate;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_ui(mut self, ui: UiConfig) -> Self {
        self.ui = ui;
        self
    }

    /// Defaults overridden by `TWIG_DATA_DIR` and `TWIG_LOG`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = var(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
            config = config.with_data_dir(dir);
        }
        if let Some(filter) = var(LOG_ENV).filter(|filter| !filter.is_empty()) {
            config = config.with_log_filter(filter);
        }
        config
    }

    /// Apply command-line options on top of this config.
    pub fn with_options(mut self, options: &RunOptions) -> Self {
        if let Some(dir) = &options.data_dir {
            self.data_dir = dir.clone();
        }
        self.invalidate |= options.invalidate;
        self
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    pub fn messages_path(&self) -> PathBuf {
        self.data_dir.join("messages.json")
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::in_dir(self.log_filter.clone(), &self.data_dir)
    }
}

/// Animation, gesture and layout constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiConfig {
    pub reveal: Duration,
    pub reveal_easing: Easing,
    /// Maximum drag offset in cells.
    pub drag_clamp: f32,
    /// Drag distance that triggers a reply.
    pub reply_threshold: f32,
    pub settle: Duration,
    pub frame_tick: Duration,
    pub max_row_width: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            reveal: Duration::from_millis(300),
            reveal_easing: Easing::EaseOutCubic,
            drag_clamp: 12.0,
            reply_threshold: 8.0,
            settle: Duration::from_millis(150),
            frame_tick: Duration::from_millis(16),
            max_row_width: 100,
        }
    }
}

impl UiConfig {
    pub fn row_config(&self) -> RowConfig {
        RowConfig {
            reveal_ms: self.reveal.as_millis() as i64,
            reveal_easing: self.reveal_easing,
            drag: DragConfig {
                clamp: self.drag_clamp,
                threshold: self.reply_threshold,
                settle_ms: self.settle.as_millis() as i64,
            },
        }
    }
}
