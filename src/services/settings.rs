//! User settings and the capability views use to read and change them.
//!
//! Every change bumps a revision counter. The app compares it against the
//! revision it last broadcast and tells all views to refresh when it moves,
//! so no view polls settings on its own.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SettingsError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
}

impl Identity {
    /// A new identity with a freshly generated id.
    pub fn generate(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Forum server address, empty until the user connects.
    pub address: String,
    pub identity: Option<Identity>,
    pub notifications_enabled: bool,
    pub bottom_app_bar: bool,
    pub dock_nav_drawer: bool,
    pub dark_mode: bool,
    pub profiling_overlay: bool,
    pub theme_overlay: bool,
    pub acknowledged_notice_version: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            address: String::new(),
            identity: None,
            notifications_enabled: true,
            bottom_app_bar: false,
            dock_nav_drawer: false,
            dark_mode: true,
            profiling_overlay: false,
            theme_overlay: false,
            acknowledged_notice_version: 0,
        }
    }
}

/// Read/write access to settings, shared between the frame thread and
/// background persistence.
pub trait SettingsService: Send + Sync {
    /// Copy of the current settings.
    fn snapshot(&self) -> Settings;

    /// Monotonic change counter.
    fn revision(&self) -> u64;

    /// Apply a change and bump the revision.
    fn modify(&self, change: &mut dyn FnMut(&mut Settings));

    /// Write the current settings to durable storage.
    fn persist(&self) -> Result<(), SettingsError>;

    fn address(&self) -> String {
        self.snapshot().address
    }

    fn identity(&self) -> Option<Identity> {
        self.snapshot().identity
    }

    fn set_address(&self, address: &str) {
        self.modify(&mut |s| s.address = address.trim().to_string());
    }

    fn set_identity(&self, identity: Identity) {
        self.modify(&mut |s| s.identity = Some(identity.clone()));
    }

    fn set_notifications_enabled(&self, enabled: bool) {
        self.modify(&mut |s| s.notifications_enabled = enabled);
    }

    fn set_bottom_app_bar(&self, enabled: bool) {
        self.modify(&mut |s| s.bottom_app_bar = enabled);
    }

    fn set_dock_nav_drawer(&self, enabled: bool) {
        self.modify(&mut |s| s.dock_nav_drawer = enabled);
    }

    fn set_dark_mode(&self, enabled: bool) {
        self.modify(&mut |s| s.dark_mode = enabled);
    }

    fn set_profiling_overlay(&self, enabled: bool) {
        self.modify(&mut |s| s.profiling_overlay = enabled);
    }

    fn set_theme_overlay(&self, enabled: bool) {
        self.modify(&mut |s| s.theme_overlay = enabled);
    }

    fn acknowledge_notice(&self, version: u32) {
        self.modify(&mut |s| {
            s.acknowledged_notice_version = s.acknowledged_notice_version.max(version)
        });
    }
}

/// Settings held in memory and optionally backed by a JSON file.
#[derive(Debug, Default)]
pub struct FileSettings {
    path: Option<PathBuf>,
    state: RwLock<Settings>,
    revision: AtomicU64,
    /// Held across snapshot and write so the file never goes backwards.
    writer: Mutex<()>,
}

impl FileSettings {
    /// Settings that are never written anywhere.
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            path: None,
            state: RwLock::new(settings),
            revision: AtomicU64::new(0),
            writer: Mutex::new(()),
        }
    }

    /// Load settings from `path`, starting from defaults if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let settings = if path.exists() {
            let json = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&json).map_err(|source| SettingsError::Malformed {
                path: path.clone(),
                source,
            })?
        } else {
            Settings::default()
        };
        Ok(Self {
            path: Some(path),
            state: RwLock::new(settings),
            revision: AtomicU64::new(0),
            writer: Mutex::new(()),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl SettingsService for FileSettings {
    fn snapshot(&self) -> Settings {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    fn modify(&self, change: &mut dyn FnMut(&mut Settings)) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        change(&mut state);
        self.revision.fetch_add(1, Ordering::AcqRel);
    }

    fn persist(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let _writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })?;
        info!("Persisted settings to {}", path.display());
        Ok(())
    }
}

/// Persist settings without blocking the frame thread.
///
/// Uses the blocking pool when a tokio runtime is available and runs inline
/// otherwise. Failures are logged; the in-memory settings stay authoritative.
pub fn persist_in_background(settings: Arc<dyn SettingsService>) {
    let job = move || {
        if let Err(e) = settings.persist() {
            warn!("Failed to persist settings: {}", e);
        }
    };
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(job);
        }
        Err(_) => job(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_setters_bump_revision() {
        let settings = FileSettings::in_memory(Settings::default());
        assert_eq!(settings.revision(), 0);
        settings.set_dark_mode(false);
        settings.set_address("  forum.example:7000 ");
        assert_eq!(settings.revision(), 2);
        assert!(!settings.snapshot().dark_mode);
        assert_eq!(settings.address(), "forum.example:7000");
    }

    #[test]
    fn test_acknowledge_notice_never_goes_backwards() {
        let settings = FileSettings::in_memory(Settings::default());
        settings.acknowledge_notice(3);
        settings.acknowledge_notice(1);
        assert_eq!(settings.snapshot().acknowledged_notice_version, 3);
    }

    #[test]
    fn test_open_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = FileSettings::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(settings.snapshot(), Settings::default());
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = FileSettings::open(&path).unwrap();
        settings.set_identity(Identity::generate("ada"));
        settings.set_bottom_app_bar(true);
        settings.persist().unwrap();

        let reloaded = FileSettings::open(&path).unwrap();
        assert_eq!(reloaded.snapshot(), settings.snapshot());
        assert_eq!(reloaded.identity().unwrap().name, "ada");
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = FileSettings::open(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Malformed { .. }));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"address":"forum.example"}"#).unwrap();
        let settings = FileSettings::open(&path).unwrap().snapshot();
        assert_eq!(settings.address, "forum.example");
        assert!(settings.dark_mode);
        assert!(settings.notifications_enabled);
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail.
        let path = dir.path().join("settings.json");
        std::fs::create_dir(&path).unwrap();
        let settings = FileSettings {
            path: Some(path),
            ..FileSettings::default()
        };
        settings.set_dark_mode(false);
        assert!(matches!(
            settings.persist(),
            Err(SettingsError::Write { .. })
        ));
        assert!(!settings.snapshot().dark_mode);
    }

    #[test]
    fn test_overlapping_persists_leave_latest_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings = FileSettings::open(&path).unwrap();

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let settings = &settings;
                scope.spawn(move || {
                    for i in 0..25 {
                        settings.set_address(&format!("host{}-{}", worker, i));
                        settings.persist().unwrap();
                    }
                });
            }
        });

        let reloaded = FileSettings::open(&path).unwrap();
        assert_eq!(reloaded.snapshot(), settings.snapshot());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_background_persists_settle_on_latest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings: Arc<dyn SettingsService> = Arc::new(FileSettings::open(&path).unwrap());

        for i in 0..50 {
            settings.set_address(&format!("host{}", i));
            persist_in_background(Arc::clone(&settings));
        }
        // Queued behind every background job.
        let last = Arc::clone(&settings);
        tokio::task::spawn_blocking(move || last.persist())
            .await
            .unwrap()
            .unwrap();

        let reloaded = FileSettings::open(&path).unwrap();
        assert_eq!(reloaded.snapshot().address, "host49");
    }

    #[test]
    fn test_persist_in_background_without_runtime_runs_inline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings: Arc<dyn SettingsService> = Arc::new(FileSettings::open(&path).unwrap());
        settings.set_dock_nav_drawer(true);
        persist_in_background(Arc::clone(&settings));
        assert!(path.exists());
    }
}
