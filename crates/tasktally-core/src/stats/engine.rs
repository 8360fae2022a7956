//! Session replay over the activation log.
//!
//! A session starts at one of the task's activation events and ends at the
//! first event in the whole log (any task, including the stop sentinel) whose
//! timestamp is strictly later. If no such event exists the session is still
//! open and ends at `now`.

use serde::{Deserialize, Serialize};

use crate::model::ActivationEvent;

/// Derived timing for one task, in whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Duration of the task's most recent session.
    pub current_session_time: i64,
    /// Duration of the most recent completed session: the latest session
    /// when another event has closed it, otherwise the one before it.
    pub last_session_time: i64,
    /// Sum of every session.
    pub total_time: i64,
}

/// Whole seconds between two millisecond instants, floored.
///
/// Not clamped: a regressing clock produces a negative value. Instants far
/// enough apart to overflow saturate at the `i64` bounds.
pub fn session_seconds(start_ms: i64, end_ms: i64) -> i64 {
    end_ms.saturating_sub(start_ms).div_euclid(1000)
}

/// Compute session stats for `task_id` from the global log.
///
/// `events` is used in the order given; callers keep it sorted by timestamp.
pub fn calculate_task_stats(task_id: &str, events: &[ActivationEvent], now_ms: i64) -> TaskStats {
    let clicks: Vec<&ActivationEvent> = events.iter().filter(|e| e.task_id == task_id).collect();
    let Some(last_index) = clicks.len().checked_sub(1) else {
        return TaskStats::default();
    };

    let mut stats = TaskStats::default();
    let mut previous_duration = 0;

    for (i, click) in clicks.iter().enumerate() {
        let next = events.iter().find(|e| e.timestamp > click.timestamp);
        let end = next.map(|e| e.timestamp).unwrap_or(now_ms);
        let duration = session_seconds(click.timestamp, end);

        stats.total_time = stats.total_time.saturating_add(duration);
        if i == last_index {
            stats.current_session_time = duration;
            stats.last_session_time = if next.is_some() { duration } else { previous_duration };
        }
        previous_duration = duration;
    }

    stats
}
