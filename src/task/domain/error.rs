//! Error types for task domain validation and parsing.

use super::{TaskCommand, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The command kind is unknown.
    #[error("unsupported task command: {0}")]
    UnsupportedCommand(String),

    /// The parameters payload does not match the command kind.
    #[error("invalid parameters for {command}: {reason}")]
    InvalidParameters {
        /// Command the payload was decoded for.
        command: TaskCommand,
        /// Decoder message.
        reason: String,
    },

    /// The playbook path is empty after trimming.
    #[error("playbook must not be empty")]
    EmptyPlaybook,

    /// The requested status change is not permitted.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
