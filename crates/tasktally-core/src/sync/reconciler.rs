//! Three-way merge of snapshots.
//!
//! Tasks and events are merged independently. Tasks are matched across the
//! baseline, local and server sets (same id first, then same name) and each
//! matched group is resolved by comparing full values. Events are the
//! deduplicated union of both sides, ordered by timestamp and then task id.
//!
//! Resolution is local-optimistic: when both sides changed a task differently
//! the local version is kept and a [`Conflict`] is reported. A task removed
//! on either side since the baseline stays removed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::model::{ActivationEvent, StoredData, Task};

/// Kind of unresolved conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    TaskModified,
}

/// Both replicas changed the same task differently. The merge used
/// `local_version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub task_name: String,
    pub local_version: Task,
    pub server_version: Task,
}

/// Informational counts relative to the local snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    pub tasks_kept: usize,
    pub tasks_updated: usize,
    pub tasks_added: usize,
    pub tasks_removed: usize,
    pub events_added: usize,
    pub events_removed: usize,
}

/// Output of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResult {
    pub data: StoredData,
    pub conflicts: Vec<Conflict>,
    pub has_true_conflicts: bool,
    pub summary: MergeSummary,
}

/// One task as seen by the three replicas.
struct Group<'a> {
    baseline: Option<&'a Task>,
    local: Option<&'a Task>,
    server: Option<&'a Task>,
    order: usize,
}

enum Resolution<'a> {
    Keep(&'a Task),
    Conflict { local: &'a Task, server: &'a Task },
    Drop,
}

/// Tasks of one replica not yet matched to a group.
struct Pool<'a> {
    tasks: Vec<(usize, &'a Task)>,
}

impl<'a> Pool<'a> {
    fn new(tasks: &'a [Task]) -> Self {
        Self {
            tasks: tasks.iter().enumerate().collect(),
        }
    }

    fn take(&mut self, wanted: &Task) -> Option<(usize, &'a Task)> {
        let index = self
            .tasks
            .iter()
            .position(|(_, t)| t.id == wanted.id)
            .or_else(|| self.tasks.iter().position(|(_, t)| t.name == wanted.name))?;
        Some(self.tasks.remove(index))
    }

    fn drain(&mut self) -> Vec<(usize, &'a Task)> {
        std::mem::take(&mut self.tasks)
    }
}

fn group_tasks<'a>(local: &'a [Task], server: &'a [Task], baseline: &'a [Task]) -> Vec<Group<'a>> {
    let mut local_pool = Pool::new(local);
    let mut server_pool = Pool::new(server);
    let server_offset = local.len();
    let baseline_offset = local.len() + server.len();
    let mut groups = Vec::new();

    for (i, base) in baseline.iter().enumerate() {
        let l = local_pool.take(base);
        let s = server_pool.take(base);
        let order = match (l, s) {
            (Some((li, _)), _) => li,
            (None, Some((si, _))) => server_offset + si,
            (None, None) => baseline_offset + i,
        };
        groups.push(Group {
            baseline: Some(base),
            local: l.map(|(_, t)| t),
            server: s.map(|(_, t)| t),
            order,
        });
    }

    for (li, l) in local_pool.drain() {
        let s = server_pool.take(l);
        groups.push(Group {
            baseline: None,
            local: Some(l),
            server: s.map(|(_, t)| t),
            order: li,
        });
    }

    for (si, s) in server_pool.drain() {
        groups.push(Group {
            baseline: None,
            local: None,
            server: Some(s),
            order: server_offset + si,
        });
    }

    groups.sort_by_key(|g| g.order);
    groups
}

fn resolve<'a>(group: &Group<'a>) -> Resolution<'a> {
    match (group.baseline, group.local, group.server) {
        // removed on at least one side since the baseline
        (Some(_), None, _) | (Some(_), Some(_), None) => Resolution::Drop,
        (None, Some(local), None) => Resolution::Keep(local),
        (None, None, Some(server)) => Resolution::Keep(server),
        (None, Some(local), Some(server)) => {
            if local == server {
                Resolution::Keep(local)
            } else {
                Resolution::Conflict { local, server }
            }
        }
        (Some(base), Some(local), Some(server)) => {
            if local == server || base == server {
                Resolution::Keep(local)
            } else if base == local {
                Resolution::Keep(server)
            } else {
                Resolution::Conflict { local, server }
            }
        }
        (None, None, None) => Resolution::Drop,
    }
}

fn merge_events(local: &[ActivationEvent], server: &[ActivationEvent]) -> Vec<ActivationEvent> {
    let mut seen: HashSet<(&str, i64)> = HashSet::new();
    let mut merged: Vec<ActivationEvent> = local
        .iter()
        .chain(server.iter())
        .filter(|e| seen.insert((e.task_id.as_str(), e.timestamp)))
        .cloned()
        .collect();
    // ties on timestamp break by task id so both replicas agree on the last event
    merged.sort_by(|a, b| (a.timestamp, &a.task_id).cmp(&(b.timestamp, &b.task_id)));
    merged
}

/// Merge `local` and `server` against their common `baseline`.
///
/// Always produces a usable snapshot; conflicts are returned as data. The
/// merged `last_modified` is the latest of both sides and the merge instant.
pub fn reconcile(
    local: &StoredData,
    server: &StoredData,
    baseline: &StoredData,
    clock: &impl Clock,
) -> ReconcileResult {
    let mut tasks = Vec::new();
    let mut conflicts = Vec::new();
    let mut summary = MergeSummary::default();

    for group in group_tasks(&local.tasks, &server.tasks, &baseline.tasks) {
        let kept = match resolve(&group) {
            Resolution::Keep(task) => Some(task),
            Resolution::Conflict { local, server } => {
                conflicts.push(Conflict {
                    kind: ConflictKind::TaskModified,
                    task_name: local.name.clone(),
                    local_version: local.clone(),
                    server_version: server.clone(),
                });
                Some(local)
            }
            Resolution::Drop => None,
        };

        match (group.local, kept) {
            (Some(l), Some(k)) if l == k => summary.tasks_kept += 1,
            (Some(_), Some(_)) => summary.tasks_updated += 1,
            (Some(_), None) => summary.tasks_removed += 1,
            (None, Some(_)) => summary.tasks_added += 1,
            (None, None) => {}
        }

        if let Some(task) = kept {
            tasks.push(task.clone());
        }
    }

    let events = merge_events(&local.events, &server.events);
    let local_keys: HashSet<(&str, i64)> = local
        .events
        .iter()
        .map(|e| (e.task_id.as_str(), e.timestamp))
        .collect();
    let from_local = events
        .iter()
        .filter(|e| local_keys.contains(&(e.task_id.as_str(), e.timestamp)))
        .count();
    summary.events_added = events.len() - from_local;
    summary.events_removed = local.events.len() - from_local;

    let last_modified = local
        .last_modified
        .max(server.last_modified)
        .max(clock.now_ms());

    ReconcileResult {
        data: StoredData {
            tasks,
            events,
            last_modified,
            sort_mode: local.sort_mode.or(server.sort_mode),
        },
        has_true_conflicts: !conflicts.is_empty(),
        conflicts,
        summary,
    }
}
