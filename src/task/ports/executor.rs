//! Executor port: admission of tasks for execution.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for executor operations.
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Runs a task's command against its bound project.
///
/// `execute` returns once the task is admitted. Completion is published
/// back to the task repository by the executor, so callers poll for status.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Admits `task` for execution.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`] when the task cannot be admitted.
    async fn execute(&self, task: &Task) -> ExecutorResult<()>;
}

/// Errors returned by executor adapters.
#[derive(Debug, Clone, Error)]
pub enum ExecutorError {
    /// The task has no bound project.
    #[error("task {0} has no bound project")]
    ProjectNotBound(TaskId),

    /// The admission queue is full.
    #[error("execution queue is full, task {0} rejected")]
    QueueFull(TaskId),

    /// The executor is no longer accepting tasks.
    #[error("executor is shut down")]
    Closed,
}
