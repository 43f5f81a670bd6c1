//! Read-side service for task lookup.

use crate::error::ErrorKind;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Service-level errors for task lookup.
#[derive(Debug, Error)]
pub enum GetTaskError {
    /// The service was built without a task repository.
    #[error("task repository not initialized")]
    RepositoryNotInitialized,
    /// No task identifier was supplied.
    #[error("task identifier not provided")]
    TaskNotProvided,
    /// The task could not be found.
    #[error("task not found: {0}")]
    TaskNotFound(#[source] TaskRepositoryError),
    /// The task list could not be read.
    #[error("failed to list tasks: {0}")]
    Listing(#[source] TaskRepositoryError),
}

impl GetTaskError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RepositoryNotInitialized => ErrorKind::NotInitialized,
            Self::TaskNotProvided => ErrorKind::NotProvided,
            Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::Listing(_) => ErrorKind::Storing,
        }
    }
}

/// Result type for task lookup.
pub type GetTaskResult<T> = Result<T, GetTaskError>;

/// Task lookup service.
#[derive(Clone)]
pub struct GetTaskService<R>
where
    R: TaskRepository,
{
    repository: Option<Arc<R>>,
}

impl<R> GetTaskService<R>
where
    R: TaskRepository,
{
    /// Creates a wired lookup service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self {
            repository: Some(repository),
        }
    }

    /// Returns the task with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GetTaskError::TaskNotFound`] when no task has the
    /// identifier, or a `NotProvided`/`NotInitialized` error for bad input
    /// or wiring.
    pub async fn get(&self, id: &str) -> GetTaskResult<Task> {
        let repository = self.repository()?;
        let Ok(task_id) = TaskId::new(id) else {
            error!("task lookup without identifier");
            return Err(GetTaskError::TaskNotProvided);
        };

        let task = repository
            .find(&task_id)
            .await
            .and_then(|found| found.ok_or_else(|| TaskRepositoryError::NotFound(task_id.clone())))
            .map_err(GetTaskError::TaskNotFound)
            .inspect_err(|err| error!(%task_id, error = %err, "task lookup failed"))?;

        debug!(%task_id, status = %task.status(), "task found");
        Ok(task)
    }

    /// Returns all tasks, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`GetTaskError::Listing`] when the repository fails.
    pub async fn list(&self) -> GetTaskResult<Vec<Task>> {
        let repository = self.repository()?;
        let mut tasks = repository
            .find_all()
            .await
            .map_err(GetTaskError::Listing)
            .inspect_err(|err| error!(error = %err, "task listing failed"))?;
        tasks.sort_by(|left, right| {
            left.created_at()
                .cmp(&right.created_at())
                .then_with(|| left.id().as_str().cmp(right.id().as_str()))
        });
        Ok(tasks)
    }

    fn repository(&self) -> GetTaskResult<&Arc<R>> {
        self.repository.as_ref().ok_or_else(|| {
            error!("task repository not initialized");
            GetTaskError::RepositoryNotInitialized
        })
    }
}

impl<R> Default for GetTaskService<R>
where
    R: TaskRepository,
{
    fn default() -> Self {
        Self { repository: None }
    }
}
