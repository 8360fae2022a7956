//! Multi-device synchronization.
//!
//! [`reconcile`] defines what a correct merge of two divergent snapshots is.
//! [`SyncSession`] is the collaborator that fetches the three snapshots from
//! storage providers, runs the merge and writes the result back.

pub mod reconciler;
pub mod session;

#[cfg(test)]
mod reconciler_tests;

pub use reconciler::{reconcile, Conflict, ConflictKind, MergeSummary, ReconcileResult};
pub use session::{SyncOutcome, SyncSession};
