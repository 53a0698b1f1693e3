//! Message data source consumed by the message list.
//!
//! A [`Subscription`] is a lazy iterator over the records as they were when
//! it was created; appending later does not affect it. Re-subscribe to see
//! new records.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::error::SourceError;
use crate::models::{Draft, MessageRecord};

pub trait MessageSource: Send + Sync {
    fn subscribe(&self) -> Subscription;

    /// Changes whenever a record is appended.
    fn revision(&self) -> u64;

    /// Append a new message, returning the stored record.
    fn submit(&self, draft: Draft) -> Result<MessageRecord, SourceError>;
}

/// Ordered, finite iterator over a snapshot of the source.
#[derive(Debug, Clone)]
pub struct Subscription {
    records: Arc<Vec<MessageRecord>>,
    next: usize,
}

impl Subscription {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Iterator for Subscription {
    type Item = MessageRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.get(self.next)?.clone();
        self.next += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

/// In-memory message store, optionally mirrored to a JSON file.
#[derive(Debug, Default)]
pub struct MemorySource {
    path: Option<PathBuf>,
    records: RwLock<Arc<Vec<MessageRecord>>>,
    revision: AtomicU64,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<MessageRecord>) -> Self {
        Self {
            path: None,
            records: RwLock::new(Arc::new(records)),
            revision: AtomicU64::new(0),
        }
    }

    /// Load records from `path`; a missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let records = if path.exists() {
            let json = fs::read_to_string(&path).map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&json).map_err(|source| SourceError::Malformed {
                path: path.clone(),
                source,
            })?
        } else {
            Vec::new()
        };
        Ok(Self {
            path: Some(path),
            records: RwLock::new(Arc::new(records)),
            revision: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn snapshot(&self) -> Arc<Vec<MessageRecord>> {
        Arc::clone(
            &self
                .records
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    /// Write all records to the backing file, if any.
    pub fn save(&self) -> Result<(), SourceError> {
        match &self.path {
            Some(path) => write_records(path, &self.snapshot()),
            None => Ok(()),
        }
    }

    fn save_in_background(&self) {
        let Some(path) = self.path.clone() else {
            return;
        };
        let records = self.snapshot();
        let job = move || {
            if let Err(e) = write_records(&path, &records) {
                warn!("Failed to save messages: {}", e);
            }
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(job);
            }
            Err(_) => job(),
        }
    }
}

fn write_records(path: &Path, records: &[MessageRecord]) -> Result<(), SourceError> {
    let io_err = |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(records).map_err(|source| SourceError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(io_err)
}

impl MessageSource for MemorySource {
    fn subscribe(&self) -> Subscription {
        Subscription {
            records: self.snapshot(),
            next: 0,
        }
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    fn submit(&self, draft: Draft) -> Result<MessageRecord, SourceError> {
        let content = draft.content.trim();
        if content.is_empty() {
            return Err(SourceError::EmptyMessage);
        }

        let record = {
            let mut guard = self
                .records
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(parent) = &draft.reply_to {
                if !guard.iter().any(|r| &r.id == parent) {
                    return Err(SourceError::UnknownParent(parent.clone()));
                }
            }
            let mut record = MessageRecord::new(draft.author, content);
            record.parent = draft.reply_to;
            Arc::make_mut(&mut *guard).push(record.clone());
            record
        };
        self.revision.fetch_add(1, Ordering::AcqRel);
        debug!("Submitted message {}", record.id.short());

        self.save_in_background();
        Ok(record)
    }
}
