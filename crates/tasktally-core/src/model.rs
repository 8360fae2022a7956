//! Persistent data model.
//!
//! A [`StoredData`] snapshot is the unit of persistence and of three-way
//! merge. It holds the task list and the activation log; no other mutable
//! time field exists, every duration is replayed from `events`.

use serde::{Deserialize, Serialize};

/// Task id used by "stop all" events. Never assigned to a real task, since
/// real ids are stringified clock values.
pub const STOP_SENTINEL_ID: &str = "__stop_all__";

/// A named task. `id` is fixed at creation; `name` is mutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// "This task became the active one at this instant" (epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationEvent {
    pub task_id: String,
    pub timestamp: i64,
}

impl ActivationEvent {
    pub fn new(task_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            task_id: task_id.into(),
            timestamp,
        }
    }

    /// Whether this is a "stop all" marker rather than a real activation.
    pub fn is_stop(&self) -> bool {
        self.task_id == STOP_SENTINEL_ID
    }
}

/// UI ordering preference carried inside the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Total,
    Alphabetical,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Total => "total",
            SortMode::Alphabetical => "alphabetical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "total" => Some(SortMode::Total),
            "alphabetical" => Some(SortMode::Alphabetical),
            _ => None,
        }
    }
}

/// Full persisted state: tasks, activation log and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredData {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<ActivationEvent>,
    pub last_modified: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_mode: Option<SortMode>,
}

impl StoredData {
    /// Empty snapshot stamped at `now_ms`.
    pub fn empty(now_ms: i64) -> Self {
        Self {
            tasks: Vec::new(),
            events: Vec::new(),
            last_modified: now_ms,
            sort_mode: None,
        }
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Id of the task named by the most recent event, if any.
    pub fn last_event_task_id(&self) -> Option<&str> {
        self.events.last().map(|e| e.task_id.as_str())
    }

    /// The real task that is currently running, if any.
    pub fn running_task(&self) -> Option<&Task> {
        self.last_event_task_id().and_then(|id| self.find_task(id))
    }
}
