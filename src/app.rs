//! Wiring of repositories, storage backends, and the executor into the
//! services exposed to an outer transport layer.

use mockable::DefaultClock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::AppConfig;
use crate::project::{
    adapters::{
        memory::InMemoryProjectRepository,
        storage::{InMemorySourceStorage, LocalSourceStorage, StorageRegistry},
    },
    domain::{ProjectDomainError, ProjectName, StorageKind},
    services::{CreateProjectService, GetProjectService},
};
use crate::task::{
    adapters::{
        UuidTaskIdGenerator,
        executor::{ProcessTaskRunner, QueueSettings, QueuedExecutor},
        memory::InMemoryTaskRepository,
    },
    domain::{Task, TaskParameters},
    ports::{TaskIdGenerator, TaskRunner},
    services::{CreateTaskService, GetTaskService},
};

/// Project registration service as wired by [`Application`].
pub type AppCreateProjectService = CreateProjectService<StorageRegistry, InMemoryProjectRepository>;

/// Task creation service as wired by [`Application`].
pub type AppCreateTaskService =
    CreateTaskService<QueuedExecutor, InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Fully wired set of services sharing one project and one task repository.
pub struct Application {
    create_project: AppCreateProjectService,
    get_project: GetProjectService<InMemoryProjectRepository>,
    create_task: AppCreateTaskService,
    get_task: GetTaskService<InMemoryTaskRepository>,
    ids: UuidTaskIdGenerator,
    clock: Arc<DefaultClock>,
    worker: JoinHandle<()>,
}

impl Application {
    /// Wires the application with a process runner invoking the configured
    /// `ansible-playbook` binary. Must be called within a Tokio runtime.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let runner = ProcessTaskRunner::new(
            config.executor.ansible_playbook_bin.clone(),
            config.storage.local_root.clone(),
        );
        Self::with_runner(config, Arc::new(runner))
    }

    /// Wires the application with a custom task runner. Must be called within
    /// a Tokio runtime.
    #[must_use]
    pub fn with_runner<T>(config: &AppConfig, runner: Arc<T>) -> Self
    where
        T: TaskRunner + 'static,
    {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);

        let storage = StorageRegistry::new()
            .with_storer(
                StorageKind::Local,
                Arc::new(LocalSourceStorage::new(config.storage.local_root.clone())),
            )
            .with_storer(StorageKind::Memory, Arc::new(InMemorySourceStorage::new()));

        let (executor, worker) = QueuedExecutor::spawn(
            runner,
            Arc::clone(&tasks),
            Arc::clone(&clock),
            QueueSettings {
                queue_capacity: config.executor.queue_capacity,
                max_concurrency: config.executor.max_concurrency,
            },
        );

        info!(
            local_root = %config.storage.local_root,
            max_concurrency = config.executor.max_concurrency,
            "application wired"
        );

        Self {
            create_project: CreateProjectService::new(Arc::new(storage), Arc::clone(&projects)),
            get_project: GetProjectService::new(Arc::clone(&projects)),
            create_task: CreateTaskService::new(
                Arc::new(executor),
                Arc::clone(&tasks),
                projects,
                Arc::clone(&clock),
            ),
            get_task: GetTaskService::new(tasks),
            ids: UuidTaskIdGenerator,
            clock,
            worker,
        }
    }

    /// Returns the project registration service.
    #[must_use]
    pub const fn create_project(&self) -> &AppCreateProjectService {
        &self.create_project
    }

    /// Returns the project lookup service.
    #[must_use]
    pub const fn get_project(&self) -> &GetProjectService<InMemoryProjectRepository> {
        &self.get_project
    }

    /// Returns the task creation service.
    #[must_use]
    pub const fn create_task(&self) -> &AppCreateTaskService {
        &self.create_task
    }

    /// Returns the task lookup service.
    #[must_use]
    pub const fn get_task(&self) -> &GetTaskService<InMemoryTaskRepository> {
        &self.get_task
    }

    /// Builds a pending task with a freshly generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError`] when `project_id` is not a valid
    /// project name.
    pub fn new_task(
        &self,
        project_id: &str,
        parameters: TaskParameters,
    ) -> Result<Task, ProjectDomainError> {
        let project = ProjectName::new(project_id)?;
        Ok(Task::new(
            self.ids.generate(),
            project,
            parameters,
            &*self.clock,
        ))
    }

    /// Stops accepting tasks and waits for the executor to drain its queue.
    ///
    /// Returns once every admitted task has run and published its terminal
    /// status.
    ///
    /// # Errors
    ///
    /// Returns the worker's [`tokio::task::JoinError`] if it panicked or was
    /// cancelled.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        let Self {
            create_task,
            worker,
            ..
        } = self;
        drop(create_task);
        worker.await
    }
}
