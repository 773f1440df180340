//! Integration tests for todo operations and reminder firing rules.

use zenith_core::model::todo::{Priority, ReminderPolicy, DAY_MS, HOUR_MS};
use zenith_core::store::MemoryStateStore;
use zenith_core::todos::{ReminderScanner, TodoError, TodoService, REMINDER_SCAN_INTERVAL_MS};

fn service(store: &MemoryStateStore) -> TodoService {
    TodoService::load(store).expect("todo service should load")
}

#[test]
fn add_toggle_and_remove_round_trip() {
    let mut store = MemoryStateStore::new();
    let mut todos = service(&store);

    let id = todos
        .add(&mut store, "  write report  ")
        .expect("todo should be created");
    assert_eq!(todos.todos()[0].text, "write report");
    assert!(!todos.todos()[0].completed);

    todos.toggle(&mut store, id).expect("toggle should apply");
    assert!(todos.todos()[0].completed);

    todos.remove(&mut store, id).expect("remove should apply");
    assert!(todos.todos().is_empty());

    let blank = todos.add(&mut store, "   ");
    assert!(matches!(blank, Err(TodoError::BlankText)));
}

#[test]
fn edits_persist_across_reload() {
    let mut store = MemoryStateStore::new();
    let id = {
        let mut todos = service(&store);
        let id = todos.add(&mut store, "pack bags").expect("add");
        todos
            .set_priority(&mut store, id, Priority::High)
            .expect("priority");
        todos
            .set_due_date(&mut store, id, Some(DAY_MS))
            .expect("due date");
        id
    };

    let todos = service(&store);
    assert_eq!(todos.todos()[0].id, id);
    assert_eq!(todos.todos()[0].priority, Priority::High);
    assert_eq!(todos.todos()[0].due_date, Some(DAY_MS));
}

#[test]
fn subtasks_follow_their_todo() {
    let mut store = MemoryStateStore::new();
    let mut todos = service(&store);

    let todo_id = todos.add(&mut store, "trip prep").expect("add");
    let subtask_id = todos
        .add_subtask(&mut store, todo_id, "book hotel")
        .expect("subtask should be created");

    todos
        .toggle_subtask(&mut store, todo_id, subtask_id)
        .expect("toggle should apply");
    assert!(todos.todos()[0].subtasks[0].completed);

    todos
        .remove_subtask(&mut store, todo_id, subtask_id)
        .expect("remove should apply");
    assert!(todos.todos()[0].subtasks.is_empty());

    let missing = todos.toggle_subtask(&mut store, todo_id, subtask_id);
    assert!(matches!(missing, Err(TodoError::SubtaskNotFound { .. })));
}

#[test]
fn move_todo_reorders_and_clamps_the_target_index() {
    let mut store = MemoryStateStore::new();
    let mut todos = service(&store);

    let a = todos.add(&mut store, "a").expect("add a");
    let _b = todos.add(&mut store, "b").expect("add b");
    let _c = todos.add(&mut store, "c").expect("add c");

    todos.move_todo(&mut store, a, 2).expect("move to end");
    let order: Vec<&str> = todos.todos().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(order, ["b", "c", "a"]);

    todos.move_todo(&mut store, a, 99).expect("clamped move");
    assert_eq!(todos.todos()[2].id, a);
}

#[test]
fn one_hour_policy_fires_at_the_offset_and_only_once() {
    let mut store = MemoryStateStore::new();
    let mut todos = service(&store);

    let due_at = 5 * HOUR_MS;
    let id = todos.add(&mut store, "join standup").expect("add");
    todos
        .set_due_date(&mut store, id, Some(due_at))
        .expect("due date");
    todos
        .set_reminder_policy(&mut store, id, ReminderPolicy::OneHourBefore)
        .expect("policy");

    // 30 minutes before the reminder instant: silent.
    let early = todos
        .scan_due_reminders(&mut store, due_at - HOUR_MS - 30 * 60 * 1_000)
        .expect("scan");
    assert!(early.is_empty());

    // Exactly at the instant: fires (inclusive comparison).
    let fired = todos
        .scan_due_reminders(&mut store, due_at - HOUR_MS)
        .expect("scan");
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].text, "join standup");
    assert_eq!(fired[0].reminder_at, due_at - HOUR_MS);

    // Still due later, but already triggered: no re-fire.
    let repeat = todos.scan_due_reminders(&mut store, due_at).expect("scan");
    assert!(repeat.is_empty());
    assert!(todos.todos()[0].reminder_triggered);
}

#[test]
fn policy_offsets_and_ineligible_todos() {
    let mut store = MemoryStateStore::new();
    let mut todos = service(&store);
    let due_at = 2 * DAY_MS;

    let day_before = todos.add(&mut store, "day before").expect("add");
    todos
        .set_due_date(&mut store, day_before, Some(due_at))
        .expect("due");
    todos
        .set_reminder_policy(&mut store, day_before, ReminderPolicy::OneDayBefore)
        .expect("policy");

    let at_due = todos.add(&mut store, "at due").expect("add");
    todos
        .set_due_date(&mut store, at_due, Some(due_at))
        .expect("due");
    todos
        .set_reminder_policy(&mut store, at_due, ReminderPolicy::AtDueDate)
        .expect("policy");

    let no_policy = todos.add(&mut store, "no policy").expect("add");
    todos
        .set_due_date(&mut store, no_policy, Some(due_at))
        .expect("due");

    let completed = todos.add(&mut store, "completed").expect("add");
    todos
        .set_due_date(&mut store, completed, Some(due_at))
        .expect("due");
    todos
        .set_reminder_policy(&mut store, completed, ReminderPolicy::AtDueDate)
        .expect("policy");
    todos.toggle(&mut store, completed).expect("toggle");

    let at_day_before = todos
        .scan_due_reminders(&mut store, due_at - DAY_MS)
        .expect("scan");
    assert_eq!(at_day_before.len(), 1);
    assert_eq!(at_day_before[0].todo_id, day_before);

    let at_due_instant = todos.scan_due_reminders(&mut store, due_at).expect("scan");
    assert_eq!(at_due_instant.len(), 1);
    assert_eq!(at_due_instant[0].todo_id, at_due);
}

#[test]
fn editing_due_date_or_policy_rearms_the_reminder() {
    let mut store = MemoryStateStore::new();
    let mut todos = service(&store);

    let id = todos.add(&mut store, "renew passport").expect("add");
    todos
        .set_due_date(&mut store, id, Some(HOUR_MS))
        .expect("due");
    todos
        .set_reminder_policy(&mut store, id, ReminderPolicy::AtDueDate)
        .expect("policy");

    let first = todos.scan_due_reminders(&mut store, HOUR_MS).expect("scan");
    assert_eq!(first.len(), 1);

    // Pushing the due date out re-arms the fired flag.
    todos
        .set_due_date(&mut store, id, Some(3 * HOUR_MS))
        .expect("new due date");
    assert!(!todos.todos()[0].reminder_triggered);

    let second = todos
        .scan_due_reminders(&mut store, 3 * HOUR_MS)
        .expect("scan");
    assert_eq!(second.len(), 1);
}

#[test]
fn scanner_gates_scans_behind_the_interval() {
    let mut store = MemoryStateStore::new();
    let mut todos = service(&store);
    let mut scanner = ReminderScanner::new();

    let id = todos.add(&mut store, "water plants").expect("add");
    todos
        .set_due_date(&mut store, id, Some(30_000))
        .expect("due");
    todos
        .set_reminder_policy(&mut store, id, ReminderPolicy::AtDueDate)
        .expect("policy");

    // First poll scans; the todo is not yet due.
    let first = scanner.poll(&mut todos, &mut store, 0).expect("poll");
    assert!(first.is_empty());

    // Due inside the interval, but the gate holds the scan back.
    let gated = scanner.poll(&mut todos, &mut store, 30_000).expect("poll");
    assert!(gated.is_empty());

    // Interval elapsed: the scan runs and fires.
    let fired = scanner
        .poll(&mut todos, &mut store, REMINDER_SCAN_INTERVAL_MS)
        .expect("poll");
    assert_eq!(fired.len(), 1);
}
