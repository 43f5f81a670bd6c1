//! Application services for task creation and lookup.

mod create;
mod get;

pub use create::{CreateTaskError, CreateTaskRequest, CreateTaskResult, CreateTaskService};
pub use get::{GetTaskError, GetTaskResult, GetTaskService};
