//! Sync command: merge local data with a snapshot in a shared folder.

use tasktally_core::storage::{data_dir, BASELINE_FILE};
use tasktally_core::{Config, FileStore, SyncOutcome, SyncSession, SystemClock};

use super::local_store;

pub fn run(remote: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let remote = match remote.or(Config::load_or_default().sync.remote_path) {
        Some(path) => path,
        None => return Err("no remote configured; pass --remote or set sync.remote_path".into()),
    };

    let session = SyncSession::new(
        local_store()?,
        FileStore::shared(&remote),
        FileStore::local(data_dir()?.join(BASELINE_FILE)),
    );

    match session.sync(&SystemClock)? {
        SyncOutcome::Pushed(data) => {
            println!("Pushed {} tasks to {remote}", data.tasks.len());
        }
        SyncOutcome::Merged(result) => {
            let s = result.summary;
            println!(
                "Synced with {remote}: {} kept, {} updated, {} added, {} removed tasks; {} new events",
                s.tasks_kept, s.tasks_updated, s.tasks_added, s.tasks_removed, s.events_added
            );
            for conflict in &result.conflicts {
                println!(
                    "conflict: '{}' changed on both sides (kept local '{}', remote had '{}')",
                    conflict.task_name, conflict.local_version.name, conflict.server_version.name
                );
            }
        }
    }
    Ok(())
}
