//! JSON-file snapshot store.
//!
//! Used for the local data file, the sync baseline, and for a snapshot kept in
//! a folder that some external tool replicates between devices.

use std::path::{Path, PathBuf};

use super::codec::{decode_snapshot, encode_snapshot};
use super::provider::{ProviderKind, StorageProvider, StoreEvent, SubscriberHub, Subscription};
use crate::error::StorageError;
use crate::model::StoredData;

/// Snapshot persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    kind: ProviderKind,
    hub: SubscriberHub,
}

impl FileStore {
    /// Store on local disk.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(path, ProviderKind::Local)
    }

    /// Store in a folder shared with other devices.
    pub fn shared(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(path, ProviderKind::Shared)
    }

    fn with_kind(path: impl Into<PathBuf>, kind: ProviderKind) -> Self {
        Self {
            path: path.into(),
            kind,
            hub: SubscriberHub::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, content: &str) -> Result<(), StorageError> {
        let write_err = |source: std::io::Error| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}

impl StorageProvider for FileStore {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn load(&self, now_ms: i64) -> Result<Option<StoredData>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                tracing::debug!(path = %self.path.display(), "loaded snapshot");
                Ok(Some(decode_snapshot(&content, now_ms)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::ReadFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, data: &StoredData) -> Result<(), StorageError> {
        let content = encode_snapshot(data)?;
        self.write_atomic(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            tasks = data.tasks.len(),
            events = data.events.len(),
            "saved snapshot"
        );
        self.hub.publish(StoreEvent::Saved(data.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(StorageError::WriteFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        }
        self.hub.publish(StoreEvent::Cleared);
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }
}
