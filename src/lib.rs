//! This crate is the client-side core of a household task planner.
//!
//! It talks to the planner REST API through the [`client`] module, and keeps the tasks of a session in a [`TaskStore`](store::TaskStore).
//!
//! The store derives two views from its tasks: a list sorted by date, and a map from calendar days ([`DateKey`](date_key::DateKey)s) to tasks. \
//! The [`calendar`] module builds month calendars from the latter, and [`MonthCursor`](calendar::MonthCursor) navigates between months.
//!
//! A [`Provider`](provider::Provider) ties a remote source and a store together, for one signed-in user.

pub mod traits;

pub mod calendar;
pub use calendar::{CalendarAggregator, MonthCursor};
mod item;
pub use item::TaskId;
mod task;
pub use task::{CompletionStatus, Task, TaskStatus};
pub mod date_key;
pub use date_key::DateKey;
pub mod error;
pub use error::Error;
pub mod store;
pub use store::TaskStore;
pub mod provider;
pub use provider::Provider;

pub mod client;
pub mod cache;
pub mod wire;

pub mod config;
pub mod utils;

#[cfg(any(test, feature = "integration_tests"))]
pub mod mock_behaviour;
#[cfg(any(test, feature = "integration_tests"))]
pub mod mock_source;
