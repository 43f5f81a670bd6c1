//! Error classification shared by the project and task services.
//!
//! Every service error reports an [`ErrorKind`], so outer layers such as an
//! HTTP transport can choose a response class without matching on each
//! concrete variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required identifier or argument was empty or absent.
    NotProvided,
    /// A repository lookup found nothing.
    NotFound,
    /// A store collided with an existing key.
    AlreadyExists,
    /// A required collaborator was not wired into the service.
    NotInitialized,
    /// Input failed a whitelist check.
    NotSupported,
    /// A persistence collaborator failed.
    Storing,
    /// The executor failed to accept a task.
    ExecuteTask,
}

impl ErrorKind {
    /// Returns the canonical name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotProvided => "not_provided",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::NotInitialized => "not_initialized",
            Self::NotSupported => "not_supported",
            Self::Storing => "storing",
            Self::ExecuteTask => "execute_task",
        }
    }

    /// Returns the response class a transport should use for this kind.
    #[must_use]
    pub const fn response_class(self) -> ResponseClass {
        match self {
            Self::NotProvided | Self::NotSupported => ResponseClass::ClientError,
            Self::NotFound => ResponseClass::NotFound,
            Self::AlreadyExists => ResponseClass::Conflict,
            Self::NotInitialized | Self::Storing | Self::ExecuteTask => ResponseClass::ServerError,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-neutral response class for a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseClass {
    /// The caller sent incomplete or unsupported input.
    ClientError,
    /// The requested entity does not exist.
    NotFound,
    /// The request conflicts with existing state.
    Conflict,
    /// The service or one of its collaborators failed.
    ServerError,
}
