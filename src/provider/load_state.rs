//! Utilities to track what a provider is currently doing

use std::fmt::{Display, Error, Formatter};

/// The remote operations a [`Provider`](crate::provider::Provider) performs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    FetchTasks,
    CreateTask,
    UpdateTask,
    UpdateTaskStatus,
    DeleteTask,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Operation::FetchTasks => write!(f, "fetching tasks"),
            Operation::CreateTask => write!(f, "creating a task"),
            Operation::UpdateTask => write!(f, "updating a task"),
            Operation::UpdateTaskStatus => write!(f, "updating a task status"),
            Operation::DeleteTask => write!(f, "deleting a task"),
        }
    }
}

/// The state of a provider, as a UI would display it
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    /// Nothing has been requested yet
    NotStarted,
    /// An operation is in progress
    Loading(Operation),
    /// The last operation succeeded
    Ready,
    /// The last operation failed
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        match self {
            LoadState::Loading(_) => true,
            _ => false,
        }
    }
}

impl Display for LoadState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            LoadState::NotStarted => write!(f, "Not started"),
            LoadState::Loading(operation) => write!(f, "{}...", operation),
            LoadState::Ready => write!(f, "Ready"),
            LoadState::Failed(err) => write!(f, "Failed: {}", err),
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::NotStarted
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<LoadState>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<LoadState>;

/// Create a feeback channel, that can be used to follow the state of a provider
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(LoadState::default())
}
