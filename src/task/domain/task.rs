//! Task aggregate root and lifecycle status.

use super::{ParseTaskStatusError, TaskCommand, TaskDomainError, TaskId, TaskParameters};
use crate::project::domain::{Project, ProjectName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been recorded but not started.
    Pending,
    /// Task is being executed.
    Running,
    /// Task finished successfully.
    Succeeded,
    /// Task finished with an error or could not start.
    Failed,
}

impl TaskStatus {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Returns whether no further transitions are allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Returns whether a task in this status may move to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Running | Self::Failed)
                | (Self::Running, Self::Succeeded | Self::Failed)
        )
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "succeeded" => Ok(Self::Succeeded),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    parameters: TaskParameters,
    project_id: ProjectName,
    project: Option<Project>,
    status: TaskStatus,
    failure: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task targeting `project_id`.
    #[must_use]
    pub fn new(
        id: TaskId,
        project_id: ProjectName,
        parameters: TaskParameters,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            parameters,
            project_id,
            project: None,
            status: TaskStatus::Pending,
            failure: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the command kind.
    #[must_use]
    pub const fn command(&self) -> TaskCommand {
        self.parameters.command()
    }

    /// Returns the command parameters.
    #[must_use]
    pub const fn parameters(&self) -> &TaskParameters {
        &self.parameters
    }

    /// Returns the name of the project this task targets.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectName {
        &self.project_id
    }

    /// Returns the resolved project, once bound.
    #[must_use]
    pub const fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the failure message of a failed task.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Binds the resolved project to this task.
    pub fn bind_project(&mut self, project: Project, clock: &impl Clock) {
        self.project = Some(project);
        self.touch(clock);
    }

    /// Moves the task to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the status table
    /// does not allow the change.
    pub fn transition_to(
        &mut self,
        next: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(next) {
            return Err(TaskDomainError::InvalidTransition {
                task_id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task failed and records why.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is
    /// already terminal.
    pub fn fail(
        &mut self,
        reason: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Failed, clock)?;
        self.failure = Some(reason.into());
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
