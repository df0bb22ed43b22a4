//! This module handles conversion between the JSON documents of the task API and internal representations
//!
//! The API names things differently from this crate (`title` vs `name`, `dueDate` vs `deadline`...), and is loose about types.
//! Everything the rest of the crate sees has been normalized here.

mod parser;
pub use parser::{parse, parse_list, ApiTask};
mod builder;
pub use builder::{build_create_request, build_update_request, CreateTaskRequest, NewTask, UpdateTaskRequest};

/// The priority the API assigns to tasks created without one
pub const DEFAULT_PRIORITY: u8 = 3;
