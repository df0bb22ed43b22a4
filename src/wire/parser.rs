//! A module to parse task documents sent by the API

use std::convert::TryFrom;

use serde::Deserialize;

use crate::date_key::parse_calendar_date;
use crate::error::Error;
use crate::item::TaskId;
use crate::task::{CompletionStatus, Task, TaskStatus};


/// A task, as the API sends it
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTask {
    pub id: TaskId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub completion_date: Option<String>,
}

impl TryFrom<ApiTask> for Task {
    type Error = Error;

    fn try_from(api_task: ApiTask) -> Result<Self, Self::Error> {
        let id = api_task.id;
        let name = match api_task.title.or(api_task.name) {
            Some(name) => name,
            None => return Err(Error::InvalidTask{ id, reason: "missing title".to_string() }),
        };

        let deadline = api_task.due_date
            .as_deref()
            .map(parse_calendar_date)
            .transpose()?;

        let is_completed = api_task.completed == Some(true)
            || api_task.status == Some(TaskStatus::Completed);
        let completion_status = if is_completed {
            let completion_date = api_task.completion_date
                .as_deref()
                .map(parse_calendar_date)
                .transpose()?;
            CompletionStatus::Completed(completion_date)
        } else {
            CompletionStatus::InProgress
        };

        let description = api_task.description.filter(|d| d.is_empty() == false);

        Ok(Task::new_with_parameters(id, name, description, deadline, completion_status))
    }
}

/// Parse a single task document into the internal representation [`crate::Task`]
pub fn parse(content: &str) -> Result<Task, Box<dyn std::error::Error>> {
    let api_task: ApiTask = serde_json::from_str(content)?;
    Ok(Task::try_from(api_task)?)
}

/// Parse the task list returned by the API.
///
/// `null` entries are skipped. Entries that cannot be understood are skipped with a warning, so that a single bad record does not hide the whole list.
pub fn parse_list(content: &str) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
    let entries: Option<Vec<Option<serde_json::Value>>> = serde_json::from_str(content)?;

    let mut tasks = Vec::new();
    for entry in entries.unwrap_or_default().into_iter().flatten() {
        let api_task: ApiTask = match serde_json::from_value(entry) {
            Err(err) => {
                log::warn!("Ignoring a malformed task: {}", err);
                continue;
            },
            Ok(t) => t,
        };
        match Task::try_from(api_task) {
            Err(err) => log::warn!("Ignoring a task: {}", err),
            Ok(task) => tasks.push(task),
        }
    }
    Ok(tasks)
}
