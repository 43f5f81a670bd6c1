//! Runner spawning the command's binary inside the project directory.

use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

use crate::project::domain::{Project, ProjectFormat, StorageKind};
use crate::task::{
    domain::Task,
    ports::{TaskRunError, TaskRunResult, TaskRunner},
};

/// Runs tasks as child processes.
///
/// The working directory is `<projects root>/<project name>`, matching the
/// layout written by the local storage backend. Only `plain` projects on
/// `local` storage have their playbook on disk there. Archives are stored
/// as uploaded and memory projects have no directory, so both are rejected
/// before anything is spawned.
#[derive(Debug, Clone)]
pub struct ProcessTaskRunner {
    binary: String,
    projects_root: Utf8PathBuf,
}

impl ProcessTaskRunner {
    /// Creates a runner invoking `binary` beneath `projects_root`.
    #[must_use]
    pub fn new(binary: impl Into<String>, projects_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            projects_root: projects_root.into(),
        }
    }
}

#[async_trait]
impl TaskRunner for ProcessTaskRunner {
    async fn run(&self, task: &Task) -> TaskRunResult<()> {
        let project = task
            .project()
            .ok_or_else(|| TaskRunError::ProjectNotBound(task.id().clone()))?;
        ensure_runnable(project)?;
        let working_dir = self.projects_root.join(project.name().as_str());
        let arguments = task.parameters().arguments();
        debug!(
            task_id = %task.id(),
            binary = %self.binary,
            ?arguments,
            %working_dir,
            "spawning task process"
        );

        let output = Command::new(&self.binary)
            .args(&arguments)
            .current_dir(&working_dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| TaskRunError::Spawn {
                command: task.command(),
                source: Arc::new(err),
            })?;

        if output.status.success() {
            return Ok(());
        }
        Err(TaskRunError::Exit {
            command: task.command(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        })
    }
}

fn ensure_runnable(project: &Project) -> TaskRunResult<()> {
    match (project.format(), project.storage()) {
        (ProjectFormat::Plain, StorageKind::Local) => Ok(()),
        (format, storage) => Err(TaskRunError::UnsupportedProject {
            project: project.name().clone(),
            format,
            storage,
        }),
    }
}
