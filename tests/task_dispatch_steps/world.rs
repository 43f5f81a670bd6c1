//! Shared world state for task dispatch BDD scenarios.

use std::sync::Arc;

use async_trait::async_trait;
use camino::Utf8PathBuf;
use playbook_deck::{
    app::Application,
    config::AppConfig,
    project::{domain::Project, services::CreateProjectError},
    task::{
        domain::Task,
        ports::{TaskRunResult, TaskRunner},
        services::CreateTaskError,
    },
};
use rstest::fixture;
use tempfile::TempDir;

/// Runner that completes every task immediately.
#[derive(Debug, Default)]
pub struct InstantRunner;

#[async_trait]
impl TaskRunner for InstantRunner {
    async fn run(&self, _task: &Task) -> TaskRunResult<()> {
        Ok(())
    }
}

/// Scenario world for task dispatch behaviour tests.
#[derive(Default)]
pub struct TaskDispatchWorld {
    pub app: Option<Application>,
    pub storage_dir: Option<TempDir>,
    pub last_upload: Option<Result<Project, CreateProjectError>>,
    pub last_task_id: Option<String>,
    pub last_create_task: Option<Result<Task, CreateTaskError>>,
}

impl TaskDispatchWorld {
    /// Wires an application over a fresh temporary storage root.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created.
    pub fn start(&mut self) -> Result<(), eyre::Report> {
        let temp = tempfile::tempdir()?;
        let mut config = AppConfig::default();
        config.storage.local_root = Utf8PathBuf::from_path_buf(temp.path().join("projects"))
            .map_err(|path| eyre::eyre!("temp path is not UTF-8: {}", path.display()))?;
        self.app = Some(Application::with_runner(&config, Arc::new(InstantRunner)));
        self.storage_dir = Some(temp);
        Ok(())
    }

    /// Returns the running application.
    ///
    /// # Errors
    ///
    /// Returns an error when no application has been started.
    pub fn app(&self) -> Result<&Application, eyre::Report> {
        self.app
            .as_ref()
            .ok_or_else(|| eyre::eyre!("application not started in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskDispatchWorld {
    TaskDispatchWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
