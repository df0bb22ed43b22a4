//! A module to build the request bodies sent to the API

use chrono::NaiveDate;
use serde::Serialize;

use crate::task::TaskStatus;
use super::DEFAULT_PRIORITY;

/// What a user fills in to create or edit a task
#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub name: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub priority: Option<u8>,
}

impl NewTask {
    pub fn new(name: String, deadline: NaiveDate) -> Self {
        Self { name, description: None, deadline: Some(deadline), priority: None }
    }
}

/// Body of `POST /api/tasks`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub status: TaskStatus,
    pub priority: u8,
}

/// Body of `PUT /api/tasks`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
}

/// New tasks always start in progress
pub fn build_create_request(task: &NewTask) -> CreateTaskRequest {
    CreateTaskRequest {
        title: task.name.clone(),
        description: task.description.clone().unwrap_or_default(),
        due_date: task.deadline.map(format_date),
        status: TaskStatus::InProgress,
        priority: task.priority.unwrap_or(DEFAULT_PRIORITY),
    }
}

pub fn build_update_request(task: &NewTask) -> UpdateTaskRequest {
    UpdateTaskRequest {
        title: task.name.clone(),
        description: task.description.clone().unwrap_or_default(),
        due_date: task.deadline.map(format_date),
    }
}

/// The API expects plain `YYYY-MM-DD` dates
pub fn format_date(date: NaiveDate) -> String {
    crate::date_key::DateKey::from(date).to_string()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request() {
        let deadline = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let task = NewTask::new(String::from("Feed the cat"), deadline);
        let body = serde_json::to_value(build_create_request(&task)).unwrap();

        assert_eq!(body, serde_json::json!({
            "title": "Feed the cat",
            "description": "",
            "dueDate": "2024-06-09",
            "status": "IN_PROGRESS",
            "priority": 3,
        }));
    }

    #[test]
    fn test_update_request() {
        let task = NewTask {
            name: String::from("Feed the dog"),
            description: Some(String::from("twice")),
            deadline: None,
            priority: Some(1),
        };
        let body = serde_json::to_value(build_update_request(&task)).unwrap();

        assert_eq!(body, serde_json::json!({
            "title": "Feed the dog",
            "description": "twice",
            "dueDate": null,
        }));
    }
}
