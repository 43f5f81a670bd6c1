//! Domain model for task orchestration.
//!
//! Tasks carry a command kind, the parameters that kind expects, and a
//! guarded lifecycle status. Infrastructure concerns stay outside this
//! boundary.

mod error;
mod ids;
mod parameters;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use parameters::{AnsiblePlaybookParameters, TaskCommand, TaskParameters};
pub use task::{Task, TaskStatus};
