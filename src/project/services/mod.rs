//! Application services for project registration and lookup.

mod create;
mod get;

pub use create::{CreateProjectError, CreateProjectRequest, CreateProjectResult, CreateProjectService};
pub use get::{GetProjectError, GetProjectResult, GetProjectService};
