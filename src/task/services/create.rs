//! Service layer for recording tasks and dispatching them to an executor.

use crate::error::ErrorKind;
use crate::project::{
    domain::{ProjectDomainError, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::Task,
    ports::{Executor, ExecutorError, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: String,
    task: Option<Task>,
}

impl CreateTaskRequest {
    /// Creates a request targeting `project_id` without a task.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            task: None,
        }
    }

    /// Sets the task to record and dispatch.
    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.task = Some(task);
        self
    }
}

/// Service-level errors for task creation.
#[derive(Debug, Error)]
pub enum CreateTaskError {
    /// The service was built without an executor.
    #[error("executor not initialized")]
    ExecutorNotInitialized,
    /// The service was built without a task repository.
    #[error("task repository not initialized")]
    TaskRepositoryNotInitialized,
    /// The service was built without a project repository.
    #[error("project repository not initialized")]
    ProjectRepositoryNotInitialized,
    /// No project identifier was supplied.
    #[error("project identifier not provided")]
    ProjectNotProvided,
    /// No task was supplied.
    #[error("task not provided")]
    TaskNotProvided,
    /// The project identifier is not a valid project name.
    #[error(transparent)]
    InvalidProject(#[from] ProjectDomainError),
    /// The task targets a different project than the request.
    #[error("task targets project '{task}' but the request names '{requested}'")]
    ProjectMismatch {
        /// Project named by the request.
        requested: ProjectName,
        /// Project named by the task.
        task: ProjectName,
    },
    /// The task could not be persisted.
    #[error("failed to store task: {0}")]
    StoringTask(#[source] TaskRepositoryError),
    /// The task's project could not be resolved.
    #[error("project not found: {0}")]
    ProjectNotFound(#[source] ProjectRepositoryError),
    /// The executor did not accept the task.
    #[error("failed to execute task: {0}")]
    ExecuteTask(#[source] ExecutorError),
}

impl CreateTaskError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ExecutorNotInitialized
            | Self::TaskRepositoryNotInitialized
            | Self::ProjectRepositoryNotInitialized => ErrorKind::NotInitialized,
            Self::ProjectNotProvided
            | Self::TaskNotProvided
            | Self::InvalidProject(ProjectDomainError::EmptyProjectName) => ErrorKind::NotProvided,
            Self::InvalidProject(_) | Self::ProjectMismatch { .. } => ErrorKind::NotSupported,
            Self::StoringTask(_) => ErrorKind::Storing,
            Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::ExecuteTask(_) => ErrorKind::ExecuteTask,
        }
    }
}

/// Result type for task creation.
pub type CreateTaskResult<T> = Result<T, CreateTaskError>;

/// Task creation and dispatch service.
///
/// Collaborators are optional so that a partially wired service reports a
/// `NotInitialized` error instead of failing at construction.
#[derive(Clone)]
pub struct CreateTaskService<E, T, P, C>
where
    E: Executor,
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    executor: Option<Arc<E>>,
    tasks: Option<Arc<T>>,
    projects: Option<Arc<P>>,
    clock: Arc<C>,
}

impl<E, T, P, C> CreateTaskService<E, T, P, C>
where
    E: Executor,
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a fully wired service.
    #[must_use]
    pub const fn new(executor: Arc<E>, tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            executor: Some(executor),
            tasks: Some(tasks),
            projects: Some(projects),
            clock,
        }
    }

    /// Creates a service with no collaborators besides the clock.
    #[must_use]
    pub const fn unwired(clock: Arc<C>) -> Self {
        Self {
            executor: None,
            tasks: None,
            projects: None,
            clock,
        }
    }

    /// Sets the executor.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<E>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Sets the task repository.
    #[must_use]
    pub fn with_task_repository(mut self, tasks: Arc<T>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    /// Sets the project repository.
    #[must_use]
    pub fn with_project_repository(mut self, projects: Arc<P>) -> Self {
        self.projects = Some(projects);
        self
    }

    /// Records a task, binds its project, and dispatches it.
    ///
    /// The task is stored before its project is resolved, so it is visible
    /// to readers (as `pending`, without a project) even when a later step
    /// fails. The returned task is the bound one; execution may still be in
    /// progress when this returns. A task the executor refuses to admit is
    /// stored as `failed` with the executor's message.
    ///
    /// # Errors
    ///
    /// Returns [`CreateTaskError`] for missing collaborators or input, a
    /// task persistence failure, an unknown project, or an executor
    /// admission failure.
    pub async fn create(&self, request: CreateTaskRequest) -> CreateTaskResult<Task> {
        let CreateTaskRequest {
            project_id,
            task: submitted,
        } = request;
        let executor = self
            .executor
            .as_ref()
            .ok_or(CreateTaskError::ExecutorNotInitialized)
            .inspect_err(|err| error!(error = %err, "task service wiring incomplete"))?;
        let tasks = self
            .tasks
            .as_ref()
            .ok_or(CreateTaskError::TaskRepositoryNotInitialized)
            .inspect_err(|err| error!(error = %err, "task service wiring incomplete"))?;
        let projects = self
            .projects
            .as_ref()
            .ok_or(CreateTaskError::ProjectRepositoryNotInitialized)
            .inspect_err(|err| error!(error = %err, "task service wiring incomplete"))?;

        let mut task = check_request(&project_id, submitted).inspect_err(|err| {
            error!(%project_id, kind = %err.kind(), error = %err, "task request rejected");
        })?;
        let task_id = task.id().clone();

        tasks
            .safe_store(&task)
            .await
            .map_err(CreateTaskError::StoringTask)
            .inspect_err(|err| error!(%task_id, error = %err, "task not stored"))?;
        debug!(%task_id, project = %task.project_id(), "task stored");

        let project = projects
            .find(task.project_id())
            .await
            .and_then(|found| {
                found.ok_or_else(|| ProjectRepositoryError::NotFound(task.project_id().clone()))
            })
            .map_err(CreateTaskError::ProjectNotFound)
            .inspect_err(|err| {
                error!(%task_id, project = %task.project_id(), error = %err, "task project not resolved");
            })?;

        task.bind_project(project, &*self.clock);
        tasks
            .update(&task)
            .await
            .map_err(CreateTaskError::StoringTask)
            .inspect_err(|err| error!(%task_id, error = %err, "bound task not stored"))?;
        debug!(%task_id, project = %task.project_id(), "task bound to project");

        if let Err(err) = executor.execute(&task).await {
            error!(%task_id, error = %err, "task not executed");
            self.record_rejection(tasks, &mut task, &err).await;
            return Err(CreateTaskError::ExecuteTask(err));
        }

        info!(
            %task_id,
            command = %task.command(),
            project = %task.project_id(),
            "task created"
        );
        Ok(task)
    }

    async fn record_rejection(&self, tasks: &Arc<T>, task: &mut Task, rejection: &ExecutorError) {
        let task_id = task.id().clone();
        if let Err(err) = task.fail(rejection.to_string(), &*self.clock) {
            warn!(%task_id, error = %err, "rejected task cannot be marked failed");
            return;
        }
        if let Err(err) = tasks.update(task).await {
            warn!(%task_id, error = %err, "rejected task status not stored");
        }
    }
}

fn check_request(project_id: &str, submitted: Option<Task>) -> CreateTaskResult<Task> {
    if project_id.trim().is_empty() {
        return Err(CreateTaskError::ProjectNotProvided);
    }
    let task = submitted.ok_or(CreateTaskError::TaskNotProvided)?;
    let requested = ProjectName::new(project_id)?;
    if &requested != task.project_id() {
        return Err(CreateTaskError::ProjectMismatch {
            requested,
            task: task.project_id().clone(),
        });
    }
    Ok(task)
}
