//! Pure state transitions.
//!
//! Each operation takes the current snapshot and a [`Clock`] and returns a
//! new snapshot; the input is never mutated. Operations that change state
//! stamp `last_modified` with the clock value. Operations that would change
//! nothing return a clone of the input.
//!
//! ```
//! use tasktally_core::{operations, FixedClock, StoredData};
//!
//! let state = StoredData::empty(0);
//! let state = operations::add_and_start_task(&state, "Write docs", &FixedClock(1_000));
//! assert_eq!(state.tasks[0].id, "1000");
//! assert_eq!(state.events.len(), 1);
//! ```

use crate::clock::Clock;
use crate::model::{ActivationEvent, StoredData, Task, STOP_SENTINEL_ID};

fn with_task(state: &StoredData, name: &str, now: i64) -> Option<StoredData> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut next = state.clone();
    next.tasks.push(Task::new(now.to_string(), name));
    next.last_modified = now;
    Some(next)
}

/// Append a new task named `name` (trimmed). Blank names are ignored.
///
/// The id is the creation instant as a string; two tasks created at the
/// same instant get the same id.
pub fn add_task(state: &StoredData, name: &str, clock: &impl Clock) -> StoredData {
    with_task(state, name, clock.now_ms()).unwrap_or_else(|| state.clone())
}

/// Append a new task and activate it at the same instant.
pub fn add_and_start_task(state: &StoredData, name: &str, clock: &impl Clock) -> StoredData {
    let now = clock.now_ms();
    match with_task(state, name, now) {
        Some(mut next) => {
            next.events.push(ActivationEvent::new(now.to_string(), now));
            next
        }
        None => state.clone(),
    }
}

/// Activate `task_id`. The id does not have to exist in the task list.
pub fn start_task(state: &StoredData, task_id: &str, clock: &impl Clock) -> StoredData {
    let now = clock.now_ms();
    let mut next = state.clone();
    next.events.push(ActivationEvent::new(task_id, now));
    next.last_modified = now;
    next
}

/// Rename a task. The new name is trimmed and may be empty.
pub fn update_task_name(state: &StoredData, task_id: &str, name: &str, clock: &impl Clock) -> StoredData {
    let Some(index) = state.tasks.iter().position(|t| t.id == task_id) else {
        return state.clone();
    };

    let mut next = state.clone();
    next.tasks[index].name = name.trim().to_string();
    next.last_modified = clock.now_ms();
    next
}

/// Remove a task together with every event that references it.
pub fn delete_task(state: &StoredData, task_id: &str, clock: &impl Clock) -> StoredData {
    let has_task = state.tasks.iter().any(|t| t.id == task_id);
    let has_events = state.events.iter().any(|e| e.task_id == task_id);
    if !has_task && !has_events {
        return state.clone();
    }

    StoredData {
        tasks: state.tasks.iter().filter(|t| t.id != task_id).cloned().collect(),
        events: state.events.iter().filter(|e| e.task_id != task_id).cloned().collect(),
        last_modified: clock.now_ms(),
        sort_mode: state.sort_mode,
    }
}

/// Drop every task and event.
pub fn delete_all_tasks(state: &StoredData, clock: &impl Clock) -> StoredData {
    StoredData {
        tasks: Vec::new(),
        events: Vec::new(),
        last_modified: clock.now_ms(),
        sort_mode: state.sort_mode,
    }
}

/// Erase the activation history but keep the tasks.
pub fn reset_all_tasks(state: &StoredData, clock: &impl Clock) -> StoredData {
    StoredData {
        tasks: state.tasks.clone(),
        events: Vec::new(),
        last_modified: clock.now_ms(),
        sort_mode: state.sort_mode,
    }
}

/// Append a stop sentinel so no task is running, keeping history.
pub fn stop_all_tasks(state: &StoredData, clock: &impl Clock) -> StoredData {
    if state.events.is_empty() {
        return state.clone();
    }
    start_task(state, STOP_SENTINEL_ID, clock)
}

/// Undo the most recent activation.
pub fn pause_current_task(state: &StoredData, clock: &impl Clock) -> StoredData {
    if state.events.is_empty() {
        return state.clone();
    }

    let mut next = state.clone();
    next.events.pop();
    next.last_modified = clock.now_ms();
    next
}
