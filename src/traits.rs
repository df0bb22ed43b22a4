use std::error::Error;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::item::TaskId;
use crate::task::{Task, TaskStatus};
use crate::wire::NewTask;

/// Which tasks to fetch from a [`TaskSource`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskQuery {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub include_completed: bool,
}

impl TaskQuery {
    /// Every task of a date window, completed ones included
    pub fn window(from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self { from_date: Some(from_date), to_date: Some(to_date), include_completed: true }
    }

    /// Whether a task filed under `date` belongs to the result of this query
    pub fn matches(&self, task: &Task, date: Option<NaiveDate>) -> bool {
        if task.completed() && self.include_completed == false {
            return false;
        }
        match date {
            None => self.from_date.is_none() && self.to_date.is_none(),
            Some(date) => {
                self.from_date.map(|from| from <= date).unwrap_or(true)
                    && self.to_date.map(|to| date <= to).unwrap_or(true)
            },
        }
    }
}

/// A remote collaborator that stores tasks, usually the REST API (see [`crate::client::Client`])
#[async_trait]
pub trait TaskSource {
    /// Returns the tasks matching the query.
    /// This function may be slow, or even fail, e.g. in case of a remote server
    async fn fetch_tasks(&mut self, query: &TaskQuery) -> Result<Vec<Task>, Box<dyn Error>>;
    /// Create a new task. Its id is assigned by the source
    async fn create_task(&mut self, task: &NewTask) -> Result<(), Box<dyn Error>>;
    /// Update the user-facing fields of a task
    async fn update_task(&mut self, id: &TaskId, task: &NewTask) -> Result<(), Box<dyn Error>>;
    /// Set the status of a task
    async fn set_task_status(&mut self, id: &TaskId, status: TaskStatus) -> Result<(), Box<dyn Error>>;
    /// Delete a task
    async fn delete_task(&mut self, id: &TaskId) -> Result<(), Box<dyn Error>>;
}
