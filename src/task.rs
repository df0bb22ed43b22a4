//! Household tasks

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::item::TaskId;

/// The status of a task, as exchanged with the API (`IN_PROGRESS` or `COMPLETED`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    InProgress,
    Completed,
}

impl TaskStatus {
    /// The query-string form of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The API describes completion with a `status`, a `completed` flag and an optional `completionDate`, yet most combinations make no sense.
/// This enum is the only encoding of completion inside this crate, so that the three cannot disagree.
///
/// `Completed(None)` only exists for tasks that came from the server without a completion date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStatus {
    Completed(Option<NaiveDate>),
    InProgress,
}
impl CompletionStatus {
    pub fn is_completed(&self) -> bool {
        match self {
            CompletionStatus::Completed(_) => true,
            _ => false,
        }
    }
}

/// A task of the family planner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The id assigned by the server
    id: TaskId,
    /// The display name of the task
    name: String,
    description: Option<String>,
    /// The day by which this task should be done
    deadline: Option<NaiveDate>,
    /// The completion status of this task
    completion_status: CompletionStatus,
}


impl Task {
    /// Create an in-progress task
    pub fn new(id: TaskId, name: String, deadline: Option<NaiveDate>) -> Self {
        Self::new_with_parameters(id, name, None, deadline, CompletionStatus::InProgress)
    }

    /// Create a new Task instance, with every field known
    pub fn new_with_parameters(id: TaskId, name: String, description: Option<String>,
                               deadline: Option<NaiveDate>, completion_status: CompletionStatus) -> Self
    {
        Self {
            id,
            name,
            description,
            deadline,
            completion_status,
        }
    }

    pub fn id(&self) -> &TaskId     { &self.id          }
    pub fn name(&self) -> &str      { &self.name        }
    pub fn description(&self) -> Option<&str>   { self.description.as_deref() }
    pub fn deadline(&self) -> Option<NaiveDate>  { self.deadline }
    pub fn completed(&self) -> bool { self.completion_status.is_completed() }
    pub fn completion_status(&self) -> &CompletionStatus    { &self.completion_status }

    pub fn status(&self) -> TaskStatus {
        match self.completion_status {
            CompletionStatus::Completed(_) => TaskStatus::Completed,
            CompletionStatus::InProgress => TaskStatus::InProgress,
        }
    }

    pub fn completion_date(&self) -> Option<NaiveDate> {
        match self.completion_status {
            CompletionStatus::Completed(date) => date,
            CompletionStatus::InProgress => None,
        }
    }

    /// The date this task is sorted by: its completion date once completed (falling back to its deadline), its deadline otherwise
    pub fn effective_date(&self) -> Option<NaiveDate> {
        match self.completion_status {
            CompletionStatus::Completed(Some(date)) => Some(date),
            CompletionStatus::Completed(None) => self.deadline,
            CompletionStatus::InProgress => self.deadline,
        }
    }

    pub fn set_name(&mut self, new_name: String) {
        self.name = new_name;
    }

    pub fn set_description(&mut self, new_description: Option<String>) {
        self.description = new_description;
    }

    pub fn set_deadline(&mut self, new_deadline: Option<NaiveDate>) {
        self.deadline = new_deadline;
    }

    /// Set the completion status
    pub fn set_completion_status(&mut self, new_completion_status: CompletionStatus) {
        self.completion_status = new_completion_status;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_and_flag_follow_completion() {
        let mut task = Task::new(TaskId::from("1"), "Water the plants".to_string(), Some(date(2024, 3, 5)));
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert_eq!(task.completed(), false);
        assert_eq!(task.completion_date(), None);

        task.set_completion_status(CompletionStatus::Completed(Some(date(2024, 3, 4))));
        assert_eq!(task.status(), TaskStatus::Completed);
        assert!(task.completed());
        assert_eq!(task.completion_date(), Some(date(2024, 3, 4)));
    }

    #[test]
    fn effective_date() {
        let active = Task::new(TaskId::from("1"), "A".to_string(), Some(date(2024, 3, 5)));
        assert_eq!(active.effective_date(), Some(date(2024, 3, 5)));

        let done = Task::new_with_parameters(TaskId::from("2"), "B".to_string(), None,
            Some(date(2024, 3, 5)), CompletionStatus::Completed(Some(date(2024, 2, 1))));
        assert_eq!(done.effective_date(), Some(date(2024, 2, 1)));

        let done_undated = Task::new_with_parameters(TaskId::from("3"), "C".to_string(), None,
            Some(date(2024, 3, 5)), CompletionStatus::Completed(None));
        assert_eq!(done_undated.effective_date(), Some(date(2024, 3, 5)));
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"IN_PROGRESS\"");
        let parsed: TaskStatus = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(parsed, TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.to_string(), "COMPLETED");
    }
}
