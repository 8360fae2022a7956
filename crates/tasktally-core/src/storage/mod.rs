pub mod codec;
mod config;
pub mod file;
pub mod memory;
pub mod provider;

pub use codec::{decode_snapshot, encode_snapshot};
pub use config::{Config, DisplayConfig, SyncConfig};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use provider::{ProviderKind, StorageProvider, StoreEvent, SubscriberHub, Subscription};

use std::path::PathBuf;

use crate::error::StorageError;

/// File name of the local snapshot inside the data directory.
pub const DATA_FILE: &str = "data.json";
/// File name of the last agreed sync snapshot inside the data directory.
pub const BASELINE_FILE: &str = "baseline.json";

/// Returns `~/.config/tasktally[-dev]/` based on TASKTALLY_ENV.
///
/// Set TASKTALLY_ENV=dev to use development data directory. TASKTALLY_DATA_DIR
/// overrides the location entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("TASKTALLY_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TASKTALLY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("tasktally-dev")
            } else {
                base_dir.join("tasktally")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
