//! Storage capability shared by every persistence backend.
//!
//! The engine never talks to a concrete backend. Callers hand it snapshots
//! loaded through a [`StorageProvider`] and save whatever it returns. Change
//! notification is an explicit stream: [`StorageProvider::subscribe`] returns
//! a [`Subscription`] that yields [`StoreEvent`]s until it is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::model::StoredData;

/// Backend family of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// File on local disk.
    Local,
    /// File in a folder shared between devices.
    Shared,
    /// In-process only.
    Memory,
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Saved(StoredData),
    Cleared,
}

/// Persistence backend for snapshots.
pub trait StorageProvider {
    fn kind(&self) -> ProviderKind;

    /// Load the stored snapshot, or `None` when nothing has been saved.
    ///
    /// `now_ms` stamps snapshots whose `lastModified` is missing.
    fn load(&self, now_ms: i64) -> Result<Option<StoredData>, StorageError>;

    fn save(&self, data: &StoredData) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;

    /// Start listening for changes made through this provider.
    fn subscribe(&self) -> Subscription;
}

#[derive(Debug, Default)]
struct HubInner {
    next_id: AtomicU64,
    senders: Mutex<Vec<(u64, Sender<StoreEvent>)>>,
}

/// Fan-out of store events to live subscriptions. Providers own one.
#[derive(Debug, Clone, Default)]
pub struct SubscriberHub {
    inner: Arc<HubInner>,
}

impl SubscriberHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().push((id, tx));
        Subscription {
            id,
            rx,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every subscriber, forgetting disconnected ones.
    pub fn publish(&self, event: StoreEvent) {
        self.lock().retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(u64, Sender<StoreEvent>)>> {
        lock_senders(&self.inner)
    }
}

fn lock_senders(inner: &HubInner) -> std::sync::MutexGuard<'_, Vec<(u64, Sender<StoreEvent>)>> {
    // a panic while holding the lock leaves the list itself intact
    inner.senders.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Live change stream. Unsubscribes when dropped.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    rx: Receiver<StoreEvent>,
    hub: Weak<HubInner>,
}

impl Subscription {
    /// Next pending event, without blocking.
    pub fn try_next(&self) -> Option<StoreEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next event.
    pub fn next_timeout(&self, timeout: Duration) -> Option<StoreEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Every event received so far.
    pub fn drain(&self) -> Vec<StoreEvent> {
        self.rx.try_iter().collect()
    }

    /// Most recent snapshot among pending events, if any was saved.
    pub fn latest_snapshot(&self) -> Option<StoredData> {
        self.drain().into_iter().rev().find_map(|event| match event {
            StoreEvent::Saved(data) => Some(data),
            StoreEvent::Cleared => None,
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            lock_senders(&inner).retain(|(id, _)| *id != self.id);
        }
    }
}
