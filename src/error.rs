//! Error types of this crate
//!
//! [`Error`] covers the in-memory task store and calendar. [`ApiError`] describes the outcomes the remote API reports.
//! Functions that perform I/O return a `Box<dyn std::error::Error>` that may wrap either of them.

use thiserror::Error;

use crate::item::TaskId;

/// Errors of the task store, the calendar and the wire translation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("No task with id {0}")]
    NotFound(TaskId),

    #[error("Invalid month {0}, expected a month between 0 and 11")]
    InvalidMonth(u32),

    #[error("Task {0} cannot be completed without a completion date")]
    MissingCompletionDate(TaskId),

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid task {id}: {reason}")]
    InvalidTask { id: TaskId, reason: String },
}

/// Failures reported by the remote API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User with this email already exists")]
    AlreadyExists,

    #[error("Invalid reset code")]
    InvalidResetCode,

    #[error("Reset code has expired")]
    ResetCodeExpired,

    #[error("Session expired, please sign in again")]
    Unauthorized,

    #[error("The server replied with an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unexpected HTTP status code {0}: {1}")]
    Status(u16, String),
}
