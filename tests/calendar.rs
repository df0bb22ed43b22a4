//! Day-level views over a loaded task store

use chrono::NaiveDate;

use family_planner::{CalendarAggregator, CompletionStatus, DateKey, MonthCursor, Task, TaskId, TaskStatus, TaskStore};
use family_planner::error::Error;


fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn completed_on(id: &str, day: NaiveDate) -> Task {
    Task::new_with_parameters(TaskId::from(id), format!("Task {}", id), None,
        None, CompletionStatus::Completed(Some(day)))
}

fn due_on(id: &str, day: NaiveDate) -> Task {
    Task::new(TaskId::from(id), format!("Task {}", id), Some(day))
}

#[test]
fn test_two_completed_and_one_active() {
    let mut store = TaskStore::new();
    store.load(vec![
        completed_on("a", date(2024, 6, 1)),
        completed_on("b", date(2024, 6, 1)),
        due_on("c", date(2024, 6, 2)),
    ]);
    let calendar = store.calendar();

    assert_eq!(calendar.completed_count_for_day(2024, 5, 1), 2);
    let second = calendar.tasks_for_day(2024, 5, 2);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id().as_str(), "c");
    assert!(CalendarAggregator::is_overdue(&second[0], date(2024, 6, 3)));
}

#[test]
fn test_day_with_only_active_tasks_counts_zero() {
    let mut store = TaskStore::new();
    store.load(vec![due_on("a", date(2024, 6, 2)), due_on("b", date(2024, 6, 2))]);

    assert_eq!(store.calendar().completed_count_for_day(2024, 5, 2), 0);
    assert_eq!(store.calendar().tasks_for_day(2024, 5, 2).len(), 2);
}

#[test]
fn test_failed_status_change_keeps_views() {
    let mut store = TaskStore::new();
    store.load(vec![completed_on("a", date(2024, 6, 1)), due_on("c", date(2024, 6, 2))]);
    let sorted_before = store.sorted_tasks().to_vec();
    let by_date_before = store.by_date_key().clone();

    let result = store.apply_status_change(&TaskId::from("missing"), TaskStatus::Completed, Some(date(2024, 6, 5)));
    assert_eq!(result, Err(Error::NotFound(TaskId::from("missing"))));
    assert_eq!(store.sorted_tasks(), sorted_before.as_slice());
    assert_eq!(store.by_date_key(), &by_date_before);
}

#[test]
fn test_browse_months_with_a_cursor() {
    let mut store = TaskStore::new();
    store.load(vec![
        completed_on("dec", date(2024, 12, 31)),
        completed_on("jan", date(2025, 1, 1)),
        completed_on("jan2", date(2025, 1, 1)),
    ]);
    let today = date(2025, 1, 1);

    let mut cursor = MonthCursor::new(2024, 11).unwrap();
    let grid = store.calendar().month_grid(cursor.year(), cursor.month(), today).unwrap();
    assert_eq!(grid.completed_count(), 1);
    assert_eq!(grid.day(31).unwrap().completed_count, 1);

    cursor.next();
    assert_eq!(cursor.as_tuple(), (2025, 0));
    let grid = store.calendar().month_grid(cursor.year(), cursor.month(), today).unwrap();
    assert_eq!(grid.completed_count(), 2);
    assert!(grid.day(1).unwrap().is_today);
    // January 1st, 2025 is a Wednesday
    assert_eq!(grid.leading_blanks, 3);

    cursor.previous();
    cursor.previous();
    assert_eq!(cursor.as_tuple(), (2024, 10));
    assert_eq!(store.calendar().month_grid(cursor.year(), cursor.month(), today).unwrap().completed_count(), 0);
}

#[test]
fn test_keys_are_stable_strings() {
    let mut store = TaskStore::new();
    store.load(vec![completed_on("a", date(2024, 3, 5)), due_on("b", date(2024, 3, 5))]);

    let keys: Vec<String> = store.by_date_key().keys().map(DateKey::to_string).collect();
    assert_eq!(keys, vec!["2024-03-05"]);
}
