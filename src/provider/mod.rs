//! This modules combines a remote task source with the local task store of a session
//!
//! Remote changes are mirrored into the local store as soon as the remote source accepts them.
//! The provider never re-fetches on its own: callers decide when to [`Provider::refresh`] to reconcile with the server.

use std::error::Error;

use chrono::NaiveDate;

use crate::calendar::CalendarAggregator;
use crate::item::TaskId;
use crate::store::TaskStore;
use crate::task::TaskStatus;
use crate::traits::{TaskQuery, TaskSource};
use crate::wire::NewTask;

pub mod load_state;
use load_state::{FeedbackSender, LoadState, Operation};


/// A data source that combines a [`TaskSource`] and a [`TaskStore`].
///
/// Usually, the source is a [`Client`](crate::client::Client). Tests use a mocked source instead.
#[derive(Debug)]
pub struct Provider<S>
where
    S: TaskSource,
{
    /// The remote source (usually a server)
    source: S,
    /// The local tasks
    store: TaskStore,

    state: LoadState,
    feedback_channel: Option<FeedbackSender>,
}

impl<S> Provider<S>
where
    S: TaskSource,
{
    /// Create a provider, with an empty store
    pub fn new(source: S) -> Self {
        Self::new_with_store(source, TaskStore::new())
    }

    /// Create a provider, with a given store
    pub fn new_with_store(source: S, store: TaskStore) -> Self {
        Self {
            source, store,
            state: LoadState::NotStarted,
            feedback_channel: None,
        }
    }

    /// Create a provider that publishes its state on a channel (see [`load_state::feedback_channel`])
    pub fn new_with_feedback_channel(source: S, channel: FeedbackSender) -> Self {
        let mut provider = Self::new(source);
        provider.feedback_channel = Some(channel);
        provider
    }

    /// Returns the remote source.
    pub fn source(&self) -> &S { &self.source }
    /// Returns the remote source.
    pub fn source_mut(&mut self) -> &mut S { &mut self.source }
    /// Returns the local store
    pub fn store(&self) -> &TaskStore { &self.store }
    /// A calendar over the local tasks
    pub fn calendar(&self) -> CalendarAggregator<'_> { self.store.calendar() }

    pub fn state(&self) -> &LoadState { &self.state }

    /// The error message of the last operation, if it failed
    pub fn last_error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Forget about the last error
    pub fn clear_error(&mut self) {
        if let LoadState::Failed(_) = self.state {
            self.set_state(LoadState::Ready);
        }
    }

    /// Replace the local tasks with the tasks of the remote source matching `query`
    pub async fn refresh(&mut self, query: &TaskQuery) -> Result<(), Box<dyn Error>> {
        self.start(Operation::FetchTasks);
        let result = self.source.fetch_tasks(query).await;
        let tasks = self.finish(Operation::FetchTasks, result)?;
        self.store.load(tasks);
        Ok(())
    }

    /// Create a task on the remote source.
    ///
    /// Its id is only known by the source, hence it will appear in the local store after the next [`Self::refresh`]
    pub async fn create_task(&mut self, task: &NewTask) -> Result<(), Box<dyn Error>> {
        self.start(Operation::CreateTask);
        let result = self.source.create_task(task).await;
        self.finish(Operation::CreateTask, result)
    }

    /// Edit a task on the remote source, then locally
    pub async fn update_task(&mut self, id: &TaskId, task: &NewTask) -> Result<(), Box<dyn Error>> {
        self.start(Operation::UpdateTask);
        let result = self.source.update_task(id, task).await;
        self.finish(Operation::UpdateTask, result)?;

        let local = self.store.update_details(id, task.name.clone(), task.description.clone(), task.deadline);
        self.mirror_locally(id, local)
    }

    /// Change the status of a task on the remote source, then locally.
    ///
    /// `completion_date` is required when completing a task. It is checked before anything is sent.
    pub async fn set_task_status(&mut self, id: &TaskId, status: TaskStatus, completion_date: Option<NaiveDate>) -> Result<(), Box<dyn Error>> {
        if status == TaskStatus::Completed && completion_date.is_none() {
            return Err(crate::error::Error::MissingCompletionDate(id.clone()).into());
        }

        self.start(Operation::UpdateTaskStatus);
        let result = self.source.set_task_status(id, status).await;
        self.finish(Operation::UpdateTaskStatus, result)?;

        let local = self.store.apply_status_change(id, status, completion_date);
        self.mirror_locally(id, local)
    }

    /// Mark a task as completed on a given day
    pub async fn complete_task(&mut self, id: &TaskId, completion_date: NaiveDate) -> Result<(), Box<dyn Error>> {
        self.set_task_status(id, TaskStatus::Completed, Some(completion_date)).await
    }

    /// Delete a task on the remote source, then locally
    pub async fn delete_task(&mut self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        self.start(Operation::DeleteTask);
        let result = self.source.delete_task(id).await;
        self.finish(Operation::DeleteTask, result)?;

        self.store.remove(id);
        Ok(())
    }

    fn start(&mut self, operation: Operation) {
        log::debug!("Started {}", operation);
        self.set_state(LoadState::Loading(operation));
    }

    fn finish<T>(&mut self, operation: Operation, result: Result<T, Box<dyn Error>>) -> Result<T, Box<dyn Error>> {
        match &result {
            Ok(_) => self.set_state(LoadState::Ready),
            Err(err) => {
                log::warn!("Failed {}: {}", operation, err);
                self.set_state(LoadState::Failed(err.to_string()));
            },
        }
        result
    }

    /// The remote source has accepted a change, now apply it to the local store.
    ///
    /// A task the store does not hold (e.g. a completed task after an active-only refresh) is not an error: the next refresh brings the change.
    fn mirror_locally(&mut self, id: &TaskId, local: Result<(), crate::error::Error>) -> Result<(), Box<dyn Error>> {
        match local {
            Ok(()) => Ok(()),
            Err(crate::error::Error::NotFound(_)) => {
                log::debug!("Task {} is not loaded, it will be up to date after the next refresh", id);
                Ok(())
            },
            Err(err) => {
                log::warn!("Unable to apply a change to task {} locally: {}", id, err);
                self.set_state(LoadState::Failed(err.to_string()));
                Err(err.into())
            },
        }
    }

    fn set_state(&mut self, state: LoadState) {
        self.state = state;
        if let Some(sender) = &self.feedback_channel {
            // Nobody may be listening anymore, this is fine
            let _ = sender.send(self.state.clone());
        }
    }
}
