//! Derived, view-only task state.
//!
//! [`DerivedTask`] values are recomputed from a snapshot and an instant on
//! every query and are never stored.

use serde::{Deserialize, Serialize};

use crate::model::{ActivationEvent, SortMode, Task};
use crate::stats::calculate_task_stats;

/// A task as shown to the user at a given instant. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedTask {
    pub id: String,
    pub name: String,
    pub is_running: bool,
    pub current_session_time: i64,
    pub last_session_time: i64,
    pub total_time: i64,
}

/// Apply the stats engine to every task, in input order.
///
/// Only the task named by the last event in `events` is running. A running
/// task reports its current session and no last session; a stopped task
/// reports its last session and no current session.
pub fn project_all(tasks: &[Task], events: &[ActivationEvent], now_ms: i64) -> Vec<DerivedTask> {
    let active_id = events.last().map(|e| e.task_id.as_str());

    tasks
        .iter()
        .map(|task| {
            let is_running = active_id == Some(task.id.as_str());
            let stats = calculate_task_stats(&task.id, events, now_ms);
            let (current_session_time, last_session_time) = if is_running {
                (stats.current_session_time, 0)
            } else {
                (0, stats.last_session_time)
            };

            DerivedTask {
                id: task.id.clone(),
                name: task.name.clone(),
                is_running,
                current_session_time,
                last_session_time,
                total_time: stats.total_time,
            }
        })
        .collect()
}

/// Order derived tasks for display. Sorting is stable, so ties keep
/// insertion order.
pub fn sort_derived(mut tasks: Vec<DerivedTask>, mode: SortMode) -> Vec<DerivedTask> {
    match mode {
        SortMode::Total => tasks.sort_by(|a, b| b.total_time.cmp(&a.total_time)),
        SortMode::Alphabetical => tasks.sort_by_cached_key(|t| t.name.to_lowercase()),
    }
    tasks
}
