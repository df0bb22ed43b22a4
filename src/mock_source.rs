//! An in-memory [`TaskSource`], that behaves like the task API for tests

use std::error::Error;

use async_trait::async_trait;
use chrono::Local;

use crate::date_key::key_for;
use crate::item::TaskId;
use crate::mock_behaviour::MockBehaviour;
use crate::task::{CompletionStatus, Task, TaskStatus};
use crate::traits::{TaskQuery, TaskSource};
use crate::wire::NewTask;

/// A mocked server
#[derive(Debug, Default)]
pub struct MockSource {
    tasks: Vec<Task>,
    behaviour: MockBehaviour,
}

impl MockSource {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks, behaviour: MockBehaviour::default() }
    }

    pub fn set_behaviour(&mut self, behaviour: MockBehaviour) {
        self.behaviour = behaviour;
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

    fn get_mut(&mut self, id: &TaskId) -> Result<&mut Task, Box<dyn Error>> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| format!("No task {} on the mocked server", id).into())
    }
}

#[async_trait]
impl TaskSource for MockSource {
    async fn fetch_tasks(&mut self, query: &TaskQuery) -> Result<Vec<Task>, Box<dyn Error>> {
        self.behaviour.can_fetch_tasks()?;
        Ok(self.tasks
            .iter()
            .filter(|task| query.matches(task, key_for(task).map(|key| key.date())))
            .cloned()
            .collect())
    }

    async fn create_task(&mut self, task: &NewTask) -> Result<(), Box<dyn Error>> {
        self.behaviour.can_create_task()?;
        let mut created = Task::new(TaskId::random(), task.name.clone(), task.deadline);
        created.set_description(task.description.clone());
        self.tasks.push(created);
        Ok(())
    }

    async fn update_task(&mut self, id: &TaskId, task: &NewTask) -> Result<(), Box<dyn Error>> {
        self.behaviour.can_update_task()?;
        let existing = self.get_mut(id)?;
        existing.set_name(task.name.clone());
        existing.set_description(task.description.clone());
        existing.set_deadline(task.deadline);
        Ok(())
    }

    async fn set_task_status(&mut self, id: &TaskId, status: TaskStatus) -> Result<(), Box<dyn Error>> {
        self.behaviour.can_set_task_status()?;
        let existing = self.get_mut(id)?;
        let completion_status = match status {
            TaskStatus::Completed => CompletionStatus::Completed(Some(Local::now().date_naive())),
            TaskStatus::InProgress => CompletionStatus::InProgress,
        };
        existing.set_completion_status(completion_status);
        Ok(())
    }

    async fn delete_task(&mut self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        self.behaviour.can_delete_task()?;
        self.get_mut(id)?;
        self.tasks.retain(|task| task.id() != id);
        Ok(())
    }
}
