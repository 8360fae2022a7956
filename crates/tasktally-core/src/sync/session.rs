//! Sync orchestration over storage providers.
//!
//! A session owns three providers: the local store, the remote store shared
//! with other devices, and the baseline store holding the last snapshot both
//! sides agreed on. Each sync leaves all three holding the same snapshot.

use crate::clock::Clock;
use crate::error::StorageError;
use crate::model::StoredData;
use crate::storage::{StorageProvider, Subscription};

use super::reconciler::{reconcile, ReconcileResult};

/// What a sync did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Remote was empty; local was uploaded as-is.
    Pushed(StoredData),
    /// Local and remote were merged.
    Merged(ReconcileResult),
}

impl SyncOutcome {
    /// Snapshot now held by every store.
    pub fn data(&self) -> &StoredData {
        match self {
            SyncOutcome::Pushed(data) => data,
            SyncOutcome::Merged(result) => &result.data,
        }
    }
}

/// Binds local, remote and baseline stores for repeated syncs.
pub struct SyncSession<L, R, B> {
    local: L,
    remote: R,
    baseline: B,
}

impl<L, R, B> SyncSession<L, R, B>
where
    L: StorageProvider,
    R: StorageProvider,
    B: StorageProvider,
{
    pub fn new(local: L, remote: R, baseline: B) -> Self {
        Self {
            local,
            remote,
            baseline,
        }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Change stream of the remote store. Feed received snapshots to
    /// [`SyncSession::apply_remote`].
    pub fn watch_remote(&self) -> Subscription {
        self.remote.subscribe()
    }

    /// Pull the remote snapshot, merge, and write the result everywhere.
    ///
    /// # Errors
    /// Returns an error if any store cannot be read or written.
    pub fn sync(&self, clock: &impl Clock) -> Result<SyncOutcome, StorageError> {
        let now = clock.now_ms();
        let local = self.local.load(now)?.unwrap_or_else(|| StoredData::empty(now));

        match self.remote.load(now)? {
            None => {
                tracing::info!(
                    remote = ?self.remote.kind(),
                    tasks = local.tasks.len(),
                    "remote empty, pushing local snapshot"
                );
                self.remote.save(&local)?;
                self.baseline.save(&local)?;
                Ok(SyncOutcome::Pushed(local))
            }
            Some(server) => self.merge(local, server, clock).map(SyncOutcome::Merged),
        }
    }

    /// Merge a snapshot delivered by the remote change stream.
    pub fn apply_remote(&self, server: StoredData, clock: &impl Clock) -> Result<ReconcileResult, StorageError> {
        let now = clock.now_ms();
        let local = self.local.load(now)?.unwrap_or_else(|| StoredData::empty(now));
        self.merge(local, server, clock)
    }

    fn merge(&self, local: StoredData, server: StoredData, clock: &impl Clock) -> Result<ReconcileResult, StorageError> {
        let now = clock.now_ms();
        let baseline = self
            .baseline
            .load(now)?
            .unwrap_or_else(|| StoredData::empty(now));

        let result = reconcile(&local, &server, &baseline, clock);
        for conflict in &result.conflicts {
            tracing::warn!(
                task = %conflict.task_name,
                local = ?conflict.local_version,
                server = ?conflict.server_version,
                "sync conflict, keeping local version"
            );
        }
        tracing::info!(summary = ?result.summary, conflicts = result.conflicts.len(), "merged snapshots");

        self.local.save(&result.data)?;
        if result.data != server {
            self.remote.save(&result.data)?;
        }
        self.baseline.save(&result.data)?;
        Ok(result)
    }
}
