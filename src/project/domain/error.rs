//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name contains path separators.
    #[error("project name '{0}' must not contain path separators")]
    InvalidProjectName(String),

    /// The filename does not end with a supported extension.
    #[error("unsupported file extension in '{0}'")]
    UnsupportedExtension(String),

    /// The content format is not in the supported whitelist.
    #[error("unsupported project format: {0}")]
    UnsupportedFormat(String),

    /// The storage backend kind is not in the supported whitelist.
    #[error("unsupported storage kind: {0}")]
    UnsupportedStorage(String),
}
