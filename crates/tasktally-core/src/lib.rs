//! # TaskTally Core Library
//!
//! This library provides the core logic for TaskTally, a personal time tracker.
//! Users define named tasks and toggle which one is active; every timing figure
//! is derived from an append-only log of activation events.
//!
//! ## Architecture
//!
//! - **Stats Engine**: replays the activation log to compute per-task session
//!   and total durations
//! - **Projection**: applies the stats engine to every task for display
//! - **Operations**: pure state transitions over a [`StoredData`] snapshot
//! - **Sync**: three-way reconciliation of local/server/baseline snapshots
//! - **Storage**: snapshot codec, pluggable providers and TOML configuration
//!
//! The engine never reads the wall clock or any global state on its own. Every
//! entry point receives the snapshot and a [`Clock`] (or an explicit instant).
//!
//! ## Key Components
//!
//! - [`calculate_task_stats`]: per-task session replay
//! - [`project_all`]: derived view of every task
//! - [`reconcile`]: three-way snapshot merge
//! - [`StorageProvider`]: capability trait for persistence backends

pub mod clock;
pub mod error;
pub mod format;
pub mod model;
pub mod operations;
pub mod projection;
pub mod stats;
pub mod storage;
pub mod sync;

pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use error::{ConfigError, StorageError};
pub use format::format_time;
pub use model::{ActivationEvent, SortMode, StoredData, Task, STOP_SENTINEL_ID};
pub use projection::{project_all, sort_derived, DerivedTask};
pub use stats::{calculate_task_stats, TaskStats};
pub use storage::{
    decode_snapshot, encode_snapshot, Config, FileStore, MemoryStore, ProviderKind, StorageProvider,
    StoreEvent, Subscription,
};
pub use sync::{reconcile, Conflict, ConflictKind, MergeSummary, ReconcileResult, SyncOutcome, SyncSession};
