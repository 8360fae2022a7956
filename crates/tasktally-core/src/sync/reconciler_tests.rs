//! Tests for reconciler module.

#[cfg(test)]
mod tests {
    use super::super::reconciler::*;
    use crate::clock::FixedClock;
    use crate::model::{ActivationEvent, SortMode, StoredData, Task};

    fn snapshot(tasks: &[(&str, &str)], events: &[(&str, i64)], last_modified: i64) -> StoredData {
        StoredData {
            tasks: tasks.iter().map(|(id, name)| Task::new(*id, *name)).collect(),
            events: events
                .iter()
                .map(|(id, ts)| ActivationEvent::new(*id, *ts))
                .collect(),
            last_modified,
            sort_mode: None,
        }
    }

    fn names(data: &StoredData) -> Vec<&str> {
        data.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_non_overlapping_additions_compose() {
        let baseline = snapshot(&[], &[], 0);
        let local = snapshot(&[("1", "TaskA")], &[], 10);
        let server = snapshot(&[("2", "TaskB")], &[], 20);

        let result = reconcile(&local, &server, &baseline, &FixedClock(5));
        assert_eq!(names(&result.data), ["TaskA", "TaskB"]);
        assert!(result.conflicts.is_empty());
        assert!(!result.has_true_conflicts);
        assert_eq!(result.summary.tasks_kept, 1);
        assert_eq!(result.summary.tasks_added, 1);
    }

    #[test]
    fn test_divergent_renames_conflict_and_keep_local() {
        let baseline = snapshot(&[("A", "X")], &[], 0);
        let local = snapshot(&[("A", "X-local")], &[], 10);
        let server = snapshot(&[("A", "X-server")], &[], 20);

        let result = reconcile(&local, &server, &baseline, &FixedClock(5));
        assert_eq!(result.conflicts.len(), 1);
        assert!(result.has_true_conflicts);
        let conflict = &result.conflicts[0];
        assert_eq!(conflict.kind, ConflictKind::TaskModified);
        assert_eq!(conflict.local_version.name, "X-local");
        assert_eq!(conflict.server_version.name, "X-server");
        assert_eq!(names(&result.data), ["X-local"]);
    }

    #[test]
    fn test_one_sided_change_wins() {
        let baseline = snapshot(&[("A", "X")], &[], 0);
        let unchanged = snapshot(&[("A", "X")], &[], 0);
        let renamed = snapshot(&[("A", "Y")], &[], 10);

        let server_changed = reconcile(&unchanged, &renamed, &baseline, &FixedClock(0));
        assert_eq!(names(&server_changed.data), ["Y"]);
        assert!(server_changed.conflicts.is_empty());
        assert_eq!(server_changed.summary.tasks_updated, 1);

        let local_changed = reconcile(&renamed, &unchanged, &baseline, &FixedClock(0));
        assert_eq!(names(&local_changed.data), ["Y"]);
        assert!(local_changed.conflicts.is_empty());
    }

    #[test]
    fn test_local_deletion_beats_server_modification() {
        let baseline = snapshot(&[("T", "Write")], &[], 0);
        let local = snapshot(&[], &[], 10);
        let server = snapshot(&[("T", "Write more")], &[], 20);

        let result = reconcile(&local, &server, &baseline, &FixedClock(0));
        assert!(result.data.tasks.is_empty());
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn test_server_deletion_removes_task() {
        let baseline = snapshot(&[("T", "Write")], &[], 0);
        let local = snapshot(&[("T", "Write")], &[], 10);
        let server = snapshot(&[], &[], 20);

        let result = reconcile(&local, &server, &baseline, &FixedClock(0));
        assert!(result.data.tasks.is_empty());
        assert_eq!(result.summary.tasks_removed, 1);
    }

    #[test]
    fn test_deleted_on_both_sides_stays_deleted() {
        let baseline = snapshot(&[("T", "Write")], &[], 0);
        let empty = snapshot(&[], &[], 10);
        let result = reconcile(&empty, &empty, &baseline, &FixedClock(0));
        assert!(result.data.tasks.is_empty());
    }

    #[test]
    fn test_same_name_created_independently_unifies() {
        let baseline = snapshot(&[], &[], 0);
        let local = snapshot(&[("1", "Email")], &[], 10);
        let identical = snapshot(&[("1", "Email")], &[], 20);
        let other_id = snapshot(&[("2", "Email")], &[], 20);

        let same = reconcile(&local, &identical, &baseline, &FixedClock(0));
        assert_eq!(same.data.tasks, vec![Task::new("1", "Email")]);
        assert!(same.conflicts.is_empty());

        let different = reconcile(&local, &other_id, &baseline, &FixedClock(0));
        assert_eq!(different.data.tasks, vec![Task::new("1", "Email")]);
        assert_eq!(different.conflicts.len(), 1);
        assert_eq!(different.conflicts[0].task_name, "Email");
    }

    #[test]
    fn test_events_are_unioned_deduplicated_and_sorted() {
        let baseline = snapshot(&[], &[], 0);
        let local = snapshot(&[], &[("a", 1000), ("b", 3000)], 10);
        let server = snapshot(&[], &[("a", 1000), ("c", 2000)], 20);

        let result = reconcile(&local, &server, &baseline, &FixedClock(0));
        let ts: Vec<i64> = result.data.events.iter().map(|e| e.timestamp).collect();
        assert_eq!(ts, [1000, 2000, 3000]);
        assert_eq!(result.summary.events_added, 1);
        assert_eq!(result.summary.events_removed, 0);
    }

    #[test]
    fn test_same_timestamp_different_tasks_are_kept() {
        let baseline = snapshot(&[], &[], 0);
        let local = snapshot(&[], &[("a", 1000)], 10);
        let server = snapshot(&[], &[("b", 1000)], 20);
        let result = reconcile(&local, &server, &baseline, &FixedClock(0));
        assert_eq!(result.data.events.len(), 2);
    }

    #[test]
    fn test_tied_events_order_is_independent_of_side() {
        let baseline = snapshot(&[], &[], 0);
        let one = snapshot(&[], &[("b", 1000), ("a", 2000)], 10);
        let two = snapshot(&[], &[("a", 1000), ("c", 2000)], 20);

        let ab = reconcile(&one, &two, &baseline, &FixedClock(0));
        let ba = reconcile(&two, &one, &baseline, &FixedClock(0));
        assert_eq!(ab.data.events, ba.data.events);

        let order: Vec<(&str, i64)> = ab
            .data
            .events
            .iter()
            .map(|e| (e.task_id.as_str(), e.timestamp))
            .collect();
        assert_eq!(order, [("a", 1000), ("b", 1000), ("a", 2000), ("c", 2000)]);
    }

    #[test]
    fn test_last_modified_takes_latest_instant() {
        let baseline = snapshot(&[], &[], 0);
        let local = snapshot(&[], &[], 100);
        let server = snapshot(&[], &[], 300);

        assert_eq!(reconcile(&local, &server, &baseline, &FixedClock(200)).data.last_modified, 300);
        assert_eq!(reconcile(&local, &server, &baseline, &FixedClock(900)).data.last_modified, 900);
    }

    #[test]
    fn test_merging_twice_adds_nothing() {
        let baseline = snapshot(&[("1", "A")], &[("1", 1000)], 0);
        let local = snapshot(&[("1", "A"), ("2", "B")], &[("1", 1000), ("2", 2000)], 10);
        let server = snapshot(&[("1", "A"), ("3", "C")], &[("1", 1000), ("3", 2500)], 20);

        let first = reconcile(&local, &server, &baseline, &FixedClock(30));
        let second = reconcile(&first.data, &server, &baseline, &FixedClock(40));
        assert_eq!(second.data.tasks, first.data.tasks);
        assert_eq!(second.data.events, first.data.events);
        assert_eq!(second.summary.events_added, 0);
        assert_eq!(second.summary.tasks_added, 0);
    }

    #[test]
    fn test_local_sort_mode_preferred() {
        let baseline = snapshot(&[], &[], 0);
        let mut local = snapshot(&[], &[], 0);
        let mut server = snapshot(&[], &[], 0);
        server.sort_mode = Some(SortMode::Alphabetical);

        assert_eq!(
            reconcile(&local, &server, &baseline, &FixedClock(0)).data.sort_mode,
            Some(SortMode::Alphabetical)
        );

        local.sort_mode = Some(SortMode::Total);
        assert_eq!(
            reconcile(&local, &server, &baseline, &FixedClock(0)).data.sort_mode,
            Some(SortMode::Total)
        );
    }

    #[test]
    fn test_conflict_serializes_with_type_tag() {
        let conflict = Conflict {
            kind: ConflictKind::TaskModified,
            task_name: "X".to_string(),
            local_version: Task::new("1", "X"),
            server_version: Task::new("2", "X"),
        };
        let json = serde_json::to_value(&conflict).unwrap();
        assert_eq!(json["type"], "task-modified");
        assert_eq!(json["taskName"], "X");
        assert_eq!(json["serverVersion"]["id"], "2");
    }
}
