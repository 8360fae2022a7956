pub mod config;
pub mod data;
pub mod sync;
pub mod task;

use tasktally_core::storage::{data_dir, DATA_FILE};
use tasktally_core::{FileStore, StorageProvider, StoredData, SystemClock};
use tasktally_core::Clock;

/// Store holding this device's snapshot.
pub fn local_store() -> Result<FileStore, Box<dyn std::error::Error>> {
    Ok(FileStore::local(data_dir()?.join(DATA_FILE)))
}

/// Current snapshot, or an empty one on first use.
pub fn load_state(store: &FileStore) -> Result<StoredData, Box<dyn std::error::Error>> {
    let now = SystemClock.now_ms();
    Ok(store.load(now)?.unwrap_or_else(|| StoredData::empty(now)))
}
