//! Integration tests for the derivation engine driven through operations.

use tasktally_core::{
    decode_snapshot, format_time, operations, project_all, sort_derived, Clock, FixedClock,
    ManualClock, SortMode, StoredData,
};

fn running_ids(data: &StoredData, now: i64) -> Vec<String> {
    project_all(&data.tasks, &data.events, now)
        .into_iter()
        .filter(|t| t.is_running)
        .map(|t| t.id)
        .collect()
}

#[test]
fn test_day_of_switching_tasks() {
    let clock = ManualClock::new(1_000);
    let mut state = StoredData::empty(0);

    state = operations::add_task(&state, "Email", &clock);
    let email = state.tasks[0].id.clone();
    clock.advance(1);
    state = operations::add_task(&state, "Code", &clock);
    let code = state.tasks[1].id.clone();

    clock.set(10_000);
    state = operations::start_task(&state, &email, &clock);
    clock.advance(90_000);
    state = operations::start_task(&state, &code, &clock);
    clock.advance(1_800_000);
    state = operations::start_task(&state, &email, &clock);
    clock.advance(30_500);

    let view = project_all(&state.tasks, &state.events, clock.now_ms());
    let email_view = view.iter().find(|t| t.id == email).unwrap();
    let code_view = view.iter().find(|t| t.id == code).unwrap();

    assert!(email_view.is_running);
    assert_eq!(email_view.current_session_time, 30);
    assert_eq!(email_view.last_session_time, 0);
    assert_eq!(email_view.total_time, 120);
    assert_eq!(format_time(email_view.total_time), "2m");

    assert!(!code_view.is_running);
    assert_eq!(code_view.last_session_time, 1_800);
    assert_eq!(code_view.total_time, 1_800);
    assert_eq!(format_time(code_view.total_time), "30m");

    let sorted = sort_derived(view, SortMode::Total);
    assert_eq!(sorted[0].id, code);
}

#[test]
fn test_at_most_one_running_task() {
    let clock = ManualClock::new(100);
    let mut state = StoredData::empty(0);
    for name in ["a", "b", "c"] {
        state = operations::add_and_start_task(&state, name, &clock);
        clock.advance(1_000);
        assert_eq!(running_ids(&state, clock.now_ms()), vec![state.events.last().unwrap().task_id.clone()]);
    }

    state = operations::stop_all_tasks(&state, &clock);
    assert!(running_ids(&state, clock.now_ms()).is_empty());

    state = operations::pause_current_task(&state, &clock);
    assert_eq!(running_ids(&state, clock.now_ms()).len(), 1);

    state = operations::reset_all_tasks(&state, &clock);
    assert!(running_ids(&state, clock.now_ms()).is_empty());
}

#[test]
fn test_deleting_running_task_leaves_nothing_running() {
    let clock = FixedClock(5_000);
    let state = operations::add_and_start_task(&StoredData::empty(0), "solo", &FixedClock(1_000));
    let id = state.tasks[0].id.clone();
    let state = operations::delete_task(&state, &id, &clock);
    assert!(state.tasks.is_empty());
    assert!(state.events.is_empty());
    assert!(running_ids(&state, 9_000).is_empty());
}

#[test]
fn test_total_is_sum_of_truncated_sessions() {
    let clock = ManualClock::new(0);
    let mut state = operations::add_and_start_task(&StoredData::empty(0), "a", &clock);
    let a = state.tasks[0].id.clone();
    state = operations::add_task(&state, "b", &FixedClock(1));
    let b = state.tasks[1].id.clone();

    // a: 1999ms, 2500ms, 700ms (open) -> 1 + 2 + 0
    clock.set(1_999);
    state = operations::start_task(&state, &b, &clock);
    clock.set(5_000);
    state = operations::start_task(&state, &a, &clock);
    clock.set(7_500);
    state = operations::start_task(&state, &b, &clock);
    clock.set(8_000);
    state = operations::start_task(&state, &a, &clock);

    let view = project_all(&state.tasks, &state.events, 8_700);
    let a_view = view.iter().find(|t| t.id == a).unwrap();
    assert_eq!(a_view.total_time, 3);
    assert_eq!(a_view.current_session_time, 0);
}

#[test]
fn test_imported_extreme_timestamps_do_not_overflow() {
    let state = decode_snapshot(
        r#"{"tasks":[{"id":"1","name":"Far"}],
            "events":[{"taskId":"1","timestamp":-9e18},{"taskId":"x","timestamp":9e18}]}"#,
        0,
    );
    assert_eq!(state.events.len(), 2);

    let view = project_all(&state.tasks, &state.events, 0);
    assert_eq!(view[0].total_time, i64::MAX / 1000);
    assert!(!view[0].is_running);
    assert_eq!(format_time(view[0].total_time).chars().last(), Some('y'));
}
