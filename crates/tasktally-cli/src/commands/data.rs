//! Snapshot import/export.

use std::path::PathBuf;

use clap::Subcommand;
use tasktally_core::{decode_snapshot, encode_snapshot, Clock, StorageProvider, SystemClock};

use super::{load_state, local_store};

#[derive(Subcommand)]
pub enum DataAction {
    /// Write the current snapshot to a JSON file
    Export {
        /// Destination file
        path: PathBuf,
    },
    /// Replace the current snapshot with a JSON file
    Import {
        /// Source file
        path: PathBuf,
    },
    /// Delete all stored data
    Clear,
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = local_store()?;

    match action {
        DataAction::Export { path } => {
            let state = load_state(&store)?;
            std::fs::write(&path, encode_snapshot(&state)?)?;
            println!("Exported {} tasks to {}", state.tasks.len(), path.display());
        }
        DataAction::Import { path } => {
            let content = std::fs::read_to_string(&path)?;
            let state = decode_snapshot(&content, SystemClock.now_ms());
            store.save(&state)?;
            println!(
                "Imported {} tasks and {} events from {}",
                state.tasks.len(),
                state.events.len(),
                path.display()
            );
        }
        DataAction::Clear => {
            store.clear()?;
            println!("Data cleared");
        }
    }
    Ok(())
}
