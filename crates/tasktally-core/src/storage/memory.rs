//! In-process snapshot store.

use std::sync::{Arc, Mutex};

use super::provider::{ProviderKind, StorageProvider, StoreEvent, SubscriberHub, Subscription};
use crate::error::StorageError;
use crate::model::StoredData;

/// Snapshot held in memory. Clones share the same slot, so one clone can act
/// as a "remote" that another part of the program writes to.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<StoredData>>>,
    hub: SubscriberHub,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: StoredData) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(data))),
            hub: SubscriberHub::new(),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<StoredData>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageProvider for MemoryStore {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Memory
    }

    fn load(&self, _now_ms: i64) -> Result<Option<StoredData>, StorageError> {
        Ok(self.slot().clone())
    }

    fn save(&self, data: &StoredData) -> Result<(), StorageError> {
        *self.slot() = Some(data.clone());
        self.hub.publish(StoreEvent::Saved(data.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot() = None;
        self.hub.publish(StoreEvent::Cleared);
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }
}
