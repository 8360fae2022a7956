//! Snapshot JSON codec.
//!
//! Decoding is lenient: whatever cannot be understood degrades to empty state
//! instead of failing. Encoding writes the canonical camelCase shape:
//!
//! ```json
//! { "tasks": [{"id": "...", "name": "..."}],
//!   "events": [{"taskId": "...", "timestamp": 0}],
//!   "lastModified": 0,
//!   "sortMode": "total" }
//! ```

use serde_json::Value;

use crate::error::StorageError;
use crate::model::{ActivationEvent, SortMode, StoredData, Task};

fn as_millis(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

fn decode_task(value: &Value) -> Option<Task> {
    let id = value.get("id")?;
    let id = match id {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let name = value.get("name").and_then(Value::as_str).unwrap_or_default();
    Some(Task::new(id, name))
}

fn decode_event(value: &Value) -> Option<ActivationEvent> {
    let task_id = match value.get("taskId")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let timestamp = as_millis(value.get("timestamp")?)?;
    Some(ActivationEvent::new(task_id, timestamp))
}

fn decode_list<T>(root: &Value, key: &str, decode: fn(&Value) -> Option<T>) -> Vec<T> {
    root.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(decode).collect())
        .unwrap_or_default()
}

/// Decode a snapshot, never failing.
///
/// Unparseable input yields an empty snapshot stamped `now_ms`. Missing or
/// malformed `tasks`/`events` become empty, malformed entries are skipped,
/// and a missing `lastModified` becomes `now_ms`.
pub fn decode_snapshot(json: &str, now_ms: i64) -> StoredData {
    let root: Value = match serde_json::from_str(json) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::warn!("snapshot root is not an object, using empty state");
            return StoredData::empty(now_ms);
        }
        Err(e) => {
            tracing::warn!(error = %e, "snapshot is not valid JSON, using empty state");
            return StoredData::empty(now_ms);
        }
    };

    StoredData {
        tasks: decode_list(&root, "tasks", decode_task),
        events: decode_list(&root, "events", decode_event),
        last_modified: root.get("lastModified").and_then(as_millis).unwrap_or(now_ms),
        sort_mode: root
            .get("sortMode")
            .and_then(Value::as_str)
            .and_then(SortMode::parse),
    }
}

/// Encode a snapshot as pretty-printed JSON.
pub fn encode_snapshot(data: &StoredData) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(data)?)
}
