//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations must be safe to share between concurrent callers.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task keyed by its identifier.
    ///
    /// The existence check and the insert are a single atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::AlreadyExists`] when the task ID is
    /// already stored.
    async fn safe_store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces an existing task (project binding, status, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns a snapshot of all stored tasks in no particular order.
    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    AlreadyExists(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
