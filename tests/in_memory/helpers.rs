//! Shared helpers for in-memory integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use camino::Utf8PathBuf;
use playbook_deck::{
    app::Application,
    config::AppConfig,
    project::services::CreateProjectRequest,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{AnsiblePlaybookParameters, Task, TaskParameters},
        ports::{TaskRunError, TaskRunResult, TaskRunner},
        services::GetTaskService,
    },
};
use tempfile::TempDir;

/// Runner that succeeds unless the playbook is named `fail.yml`. A playbook
/// named `slow.yml` takes a moment before succeeding.
#[derive(Debug, Default)]
pub struct StubRunner;

#[async_trait]
impl TaskRunner for StubRunner {
    async fn run(&self, task: &Task) -> TaskRunResult<()> {
        match task.parameters() {
            TaskParameters::AnsiblePlaybook(parameters) if parameters.playbook() == "fail.yml" => {
                Err(TaskRunError::Exit {
                    command: task.command(),
                    code: Some(2),
                    stderr: "stub failure".to_owned(),
                })
            }
            TaskParameters::AnsiblePlaybook(parameters) if parameters.playbook() == "slow.yml" => {
                tokio::time::sleep(Duration::from_millis(300)).await;
                Ok(())
            }
            TaskParameters::AnsiblePlaybook(_) => Ok(()),
        }
    }
}

/// Application wired with [`StubRunner`] and a temporary local root.
pub struct TestApp {
    /// The wired application.
    pub app: Application,
    /// Root of the local storage backend.
    pub local_root: Utf8PathBuf,
    _temp: TempDir,
}

/// Builds an application rooted in a fresh temporary directory.
///
/// # Errors
///
/// Returns an error when the temporary directory cannot be created or is not
/// valid UTF-8.
pub fn test_app() -> Result<TestApp, eyre::Report> {
    let temp = tempfile::tempdir()?;
    let local_root = Utf8PathBuf::from_path_buf(temp.path().join("projects"))
        .map_err(|path| eyre::eyre!("temp path is not UTF-8: {}", path.display()))?;
    let mut config = AppConfig::default();
    config.storage.local_root = local_root.clone();
    let app = Application::with_runner(&config, Arc::new(StubRunner));
    Ok(TestApp {
        app,
        local_root,
        _temp: temp,
    })
}

/// Builds an application wired with the process runner, rooted in `temp`.
///
/// # Errors
///
/// Returns an error when `temp` is not valid UTF-8 or the configuration is
/// rejected.
pub fn process_app(temp: &TempDir) -> Result<Application, eyre::Report> {
    let root = temp
        .path()
        .to_str()
        .ok_or_else(|| eyre::eyre!("temp path is not UTF-8"))?;
    let config = AppConfig::from_yaml_str(&format!(
        "storage:\n  local_root: {root}\nexecutor:\n  max_concurrency: 1\n"
    ))?;
    Ok(Application::from_config(&config))
}

/// Builds a create-project request carrying `content`.
#[must_use]
pub fn project_request(
    format: &str,
    storage: &str,
    filename: &str,
    content: &'static [u8],
) -> CreateProjectRequest {
    CreateProjectRequest::new(format, storage, filename).with_content(content)
}

/// Builds `ansible-playbook` parameters running `playbook`.
///
/// # Errors
///
/// Returns an error when the playbook name is blank.
pub fn playbook(playbook: &str) -> Result<TaskParameters, eyre::Report> {
    Ok(AnsiblePlaybookParameters::new(playbook)?.into())
}

/// Polls `get_task` until the task reaches a terminal status.
///
/// # Errors
///
/// Returns an error when the lookup fails or the task does not finish within
/// five seconds.
pub async fn wait_for_terminal(
    get_task: &GetTaskService<InMemoryTaskRepository>,
    id: &str,
) -> Result<Task, eyre::Report> {
    let poll = async {
        loop {
            let task = get_task.get(id).await?;
            if task.status().is_terminal() {
                return Ok::<_, eyre::Report>(task);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };
    tokio::time::timeout(Duration::from_secs(5), poll)
        .await
        .map_err(|_| eyre::eyre!("task {id} did not finish in time"))?
}
