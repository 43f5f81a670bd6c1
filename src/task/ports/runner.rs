//! Runner port: the blocking run of a single task's command.

use crate::project::domain::{ProjectFormat, ProjectName, StorageKind};
use crate::task::domain::{Task, TaskCommand, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task runs.
pub type TaskRunResult<T> = Result<T, TaskRunError>;

/// Runs a task's command to completion.
#[async_trait]
pub trait TaskRunner: Send + Sync {
    /// Runs `task` and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRunError`] when the project cannot be run, or the
    /// command cannot start or exits unsuccessfully.
    async fn run(&self, task: &Task) -> TaskRunResult<()>;
}

/// Errors returned by task runners.
#[derive(Debug, Clone, Error)]
pub enum TaskRunError {
    /// The task has no bound project.
    #[error("task {0} has no bound project")]
    ProjectNotBound(TaskId),

    /// The runner cannot run against the project's content as stored.
    #[error("project {project} is {format} content on {storage} storage, which this runner cannot run")]
    UnsupportedProject {
        /// Project the task is bound to.
        project: ProjectName,
        /// Format of the stored content.
        format: ProjectFormat,
        /// Backend holding the content.
        storage: StorageKind,
    },

    /// The command process could not be spawned.
    #[error("failed to start {command}: {source}")]
    Spawn {
        /// Command that failed to start.
        command: TaskCommand,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The command exited unsuccessfully.
    #[error("{command} exited with {}: {stderr}", describe_exit(.code))]
    Exit {
        /// Command that failed.
        command: TaskCommand,
        /// Exit code, absent when terminated by a signal.
        code: Option<i32>,
        /// Trimmed standard error output.
        stderr: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_owned(), |value| format!("code {value}"))
}
