//! Whitelisted content formats, storage kinds, and filename extensions.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filename extensions accepted for uploaded project content.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = [".tar.gz", ".tgz", ".tar", ".yml", ".yaml"];

/// Checks that `filename` ends with one of [`SUPPORTED_EXTENSIONS`].
///
/// A bare extension such as `.tar.gz` is rejected because it carries no
/// project name.
///
/// # Errors
///
/// Returns [`ProjectDomainError::UnsupportedExtension`] otherwise.
pub fn ensure_supported_extension(filename: &str) -> Result<(), ProjectDomainError> {
    let lowered = filename.to_ascii_lowercase();
    let supported = SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| lowered.len() > ext.len() && lowered.ends_with(ext));

    if supported {
        Ok(())
    } else {
        Err(ProjectDomainError::UnsupportedExtension(filename.to_owned()))
    }
}

/// Format of the uploaded project content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectFormat {
    /// A single uncompressed playbook file.
    Plain,
    /// A gzip-compressed tar archive.
    TarGz,
    /// An uncompressed tar archive.
    Tar,
}

impl ProjectFormat {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::TarGz => "targz",
            Self::Tar => "tar",
        }
    }
}

impl TryFrom<&str> for ProjectFormat {
    type Error = ProjectDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "plain" => Ok(Self::Plain),
            "targz" | "tar.gz" => Ok(Self::TarGz),
            "tar" => Ok(Self::Tar),
            _ => Err(ProjectDomainError::UnsupportedFormat(value.to_owned())),
        }
    }
}

impl fmt::Display for ProjectFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage backend kind a project's content is persisted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Local filesystem storage.
    Local,
    /// Process-local in-memory storage.
    Memory,
}

impl StorageKind {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Memory => "memory",
        }
    }
}

impl TryFrom<&str> for StorageKind {
    type Error = ProjectDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "local" => Ok(Self::Local),
            "memory" => Ok(Self::Memory),
            _ => Err(ProjectDomainError::UnsupportedStorage(value.to_owned())),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
