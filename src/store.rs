//! The in-memory list of tasks of a session, and the views derived from it

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::calendar::CalendarAggregator;
use crate::date_key::{key_for_on, DateKey};
use crate::error::Error;
use crate::item::TaskId;
use crate::task::{CompletionStatus, Task, TaskStatus};

/// Owns the canonical list of tasks of a signed-in user.
///
/// Two views are derived from it after every mutation:
/// * the tasks sorted by effective date, most recent first (see [`Task::effective_date`])
/// * the tasks filed by calendar day (see [`crate::date_key::key_for`])
///
/// They are never modified on their own, so they cannot go stale.
/// Callers are expected to own one store per session, and to call its methods one at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,

    sorted: Vec<Task>,
    by_date: BTreeMap<DateKey, Vec<Task>>,

    /// When set, used instead of the current local day to file completed tasks without any date
    pinned_today: Option<NaiveDate>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that considers `today` as the current day, whatever the clock says
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            pinned_today: Some(today),
            ..Self::default()
        }
    }

    /// Replace the whole task list, e.g. with the result of a fetch
    pub fn load(&mut self, tasks: Vec<Task>) {
        log::debug!("Loading {} tasks", tasks.len());
        self.tasks = tasks;
        self.reorganize();
    }

    /// Append a task, e.g. one that has just been created on the server
    pub fn insert(&mut self, task: Task) {
        self.tasks.push(task);
        self.reorganize();
    }

    /// Change the status of a task.
    ///
    /// Completing a task requires a `completion_date`. Moving it back in progress drops its completion date.
    pub fn apply_status_change(&mut self, id: &TaskId, new_status: TaskStatus, completion_date: Option<NaiveDate>) -> Result<(), Error> {
        let index = self.position(id)?;

        let new_completion_status = match new_status {
            TaskStatus::Completed => match completion_date {
                None => return Err(Error::MissingCompletionDate(id.clone())),
                Some(date) => CompletionStatus::Completed(Some(date)),
            },
            TaskStatus::InProgress => CompletionStatus::InProgress,
        };

        self.tasks[index].set_completion_status(new_completion_status);
        self.reorganize();
        Ok(())
    }

    /// Edit the user-facing fields of a task
    pub fn update_details(&mut self, id: &TaskId, name: String, description: Option<String>, deadline: Option<NaiveDate>) -> Result<(), Error> {
        let index = self.position(id)?;

        let task = &mut self.tasks[index];
        task.set_name(name);
        task.set_description(description);
        task.set_deadline(deadline);
        self.reorganize();
        Ok(())
    }

    /// Delete a task.
    ///
    /// Deleting a task that is not here is not an error: it may have been removed by a refresh already.
    pub fn remove(&mut self, id: &TaskId) {
        let count_before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        if self.tasks.len() == count_before {
            log::debug!("Task {} is not in the store, nothing to remove", id);
        }
        self.reorganize();
    }

    /// The tasks, in the order they were loaded
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The tasks, most recent effective date first.
    ///
    /// Tasks with the same effective date keep their relative order. Tasks without any date come last.
    pub fn sorted_tasks(&self) -> &[Task] {
        &self.sorted
    }

    /// The tasks filed by calendar day. Active tasks without deadline are not in there.
    pub fn by_date_key(&self) -> &BTreeMap<DateKey, Vec<Task>> {
        &self.by_date
    }

    /// The tasks filed under a given day
    pub fn tasks_for_key(&self, key: &DateKey) -> &[Task] {
        self.by_date
            .get(key)
            .map(|bucket| bucket.as_slice())
            .unwrap_or(&[])
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The tasks that are not completed yet, most recent first
    pub fn active_tasks(&self) -> Vec<&Task> {
        self.sorted
            .iter()
            .filter(|task| task.completed() == false)
            .collect()
    }

    /// The tasks whose deadline is before `reference`, most recent first
    pub fn overdue_tasks(&self, reference: NaiveDate) -> Vec<&Task> {
        self.sorted
            .iter()
            .filter(|task| CalendarAggregator::is_overdue(task, reference))
            .collect()
    }

    /// A calendar over the current tasks
    pub fn calendar(&self) -> CalendarAggregator<'_> {
        CalendarAggregator::new(&self.by_date)
    }

    fn position(&self, id: &TaskId) -> Result<usize, Error> {
        self.tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn reorganize(&mut self) {
        self.sorted = sort_tasks_by_date(&self.tasks);
        self.by_date = organize_tasks_by_date(&self.tasks, self.today());
    }
}

/// `sort_by` is stable, hence tasks with the same date stay in their original order
fn sort_tasks_by_date(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));
    sorted
}

fn organize_tasks_by_date(tasks: &[Task], today: NaiveDate) -> BTreeMap<DateKey, Vec<Task>> {
    let mut by_date: BTreeMap<DateKey, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(key) = key_for_on(task, today) {
            by_date.entry(key).or_default().push(task.clone());
        }
    }
    by_date
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn active(id: &str, deadline: Option<NaiveDate>) -> Task {
        Task::new(TaskId::from(id), format!("Task {}", id), deadline)
    }

    fn done(id: &str, completion: NaiveDate) -> Task {
        Task::new_with_parameters(TaskId::from(id), format!("Task {}", id), None,
            None, CompletionStatus::Completed(Some(completion)))
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id().as_str()).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            active("a", Some(date(2024, 6, 2))),
            done("b", date(2024, 6, 1)),
            active("c", None),
            done("d", date(2024, 6, 1)),
            active("e", Some(date(2024, 7, 14))),
        ]
    }

    #[test]
    fn load_is_idempotent() {
        let mut store = TaskStore::with_today(date(2024, 6, 10));
        store.load(sample());
        let first_sorted = store.sorted_tasks().to_vec();
        let first_by_date = store.by_date_key().clone();

        store.load(sample());
        assert_eq!(store.sorted_tasks(), first_sorted.as_slice());
        assert_eq!(store.by_date_key(), &first_by_date);
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut store = TaskStore::new();
        store.load(sample());
        assert_eq!(ids(store.sorted_tasks()), vec!["e", "a", "b", "d", "c"]);

        // same dates, reversed input order
        store.load(vec![done("d", date(2024, 6, 1)), done("b", date(2024, 6, 1))]);
        assert_eq!(ids(store.sorted_tasks()), vec!["d", "b"]);
    }

    #[test]
    fn grouping_keeps_order_and_skips_undated_active_tasks() {
        let mut store = TaskStore::new();
        store.load(sample());

        let by_date = store.by_date_key();
        assert_eq!(by_date.len(), 3);
        let june_first: DateKey = "2024-06-01".parse().unwrap();
        assert_eq!(ids(&by_date[&june_first]), vec!["b", "d"]);
        assert!(by_date.values().flatten().all(|t| t.id().as_str() != "c"));
        assert_eq!(ids(store.sorted_tasks()).len(), 5);
    }

    #[test]
    fn status_change_moves_task_to_its_completion_day() {
        let mut store = TaskStore::new();
        store.load(sample());
        let id = TaskId::from("a");

        store.apply_status_change(&id, TaskStatus::Completed, Some(date(2024, 5, 30))).unwrap();
        let task = store.get(&id).unwrap();
        assert!(task.completed());
        assert_eq!(task.status(), TaskStatus::Completed);
        assert_eq!(task.completion_date(), Some(date(2024, 5, 30)));

        let new_day: DateKey = "2024-05-30".parse().unwrap();
        let old_day: DateKey = "2024-06-02".parse().unwrap();
        assert_eq!(ids(store.tasks_for_key(&new_day)), vec!["a"]);
        assert!(store.tasks_for_key(&old_day).is_empty());

        store.apply_status_change(&id, TaskStatus::InProgress, Some(date(2024, 5, 30))).unwrap();
        let task = store.get(&id).unwrap();
        assert_eq!(task.completed(), false);
        assert_eq!(task.completion_date(), None);
        assert_eq!(ids(store.tasks_for_key(&old_day)), vec!["a"]);
    }

    #[test]
    fn status_change_errors_leave_the_store_untouched() {
        let mut store = TaskStore::new();
        store.load(sample());
        let before = store.clone();

        let missing = TaskId::from("nope");
        assert_eq!(store.apply_status_change(&missing, TaskStatus::Completed, Some(date(2024, 1, 1))),
                   Err(Error::NotFound(missing.clone())));
        assert_eq!(store, before);

        let id = TaskId::from("a");
        assert_eq!(store.apply_status_change(&id, TaskStatus::Completed, None),
                   Err(Error::MissingCompletionDate(id.clone())));
        assert_eq!(store, before);
    }

    #[test]
    fn remove_is_lenient() {
        let mut store = TaskStore::new();
        store.load(sample());

        store.remove(&TaskId::from("b"));
        assert_eq!(store.len(), 4);
        let june_first: DateKey = "2024-06-01".parse().unwrap();
        assert_eq!(ids(store.tasks_for_key(&june_first)), vec!["d"]);

        store.remove(&TaskId::from("b"));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn update_details_refiles_the_task() {
        let mut store = TaskStore::new();
        store.load(sample());
        let id = TaskId::from("c");

        store.update_details(&id, "Mow the lawn".to_string(), Some("front yard".to_string()), Some(date(2024, 8, 1))).unwrap();
        let key: DateKey = "2024-08-01".parse().unwrap();
        assert_eq!(store.tasks_for_key(&key)[0].name(), "Mow the lawn");
        assert_eq!(ids(store.sorted_tasks())[0], "c");

        assert!(store.update_details(&TaskId::from("zz"), "x".to_string(), None, None).is_err());
    }

    #[test]
    fn active_and_overdue_views() {
        let mut store = TaskStore::new();
        store.load(sample());
        assert_eq!(store.active_tasks().len(), 3);

        let overdue: Vec<&str> = store.overdue_tasks(date(2024, 7, 1))
            .into_iter()
            .map(|t| t.id().as_str())
            .collect();
        assert_eq!(overdue, vec!["a"]);
    }

    #[test]
    fn empty_store() {
        let store = TaskStore::new();
        assert!(store.is_empty());
        assert!(store.sorted_tasks().is_empty());
        assert!(store.by_date_key().is_empty());
    }
}
