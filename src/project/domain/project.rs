//! Project aggregate.

use super::{ProjectFormat, ProjectName, StorageKind};
use serde::{Deserialize, Serialize};

/// Registered automation project.
///
/// A project's name is its identity and does not change once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    name: ProjectName,
    reference: String,
    format: ProjectFormat,
    storage: StorageKind,
}

impl Project {
    /// Creates a project value.
    #[must_use]
    pub fn new(
        name: ProjectName,
        reference: impl Into<String>,
        format: ProjectFormat,
        storage: StorageKind,
    ) -> Self {
        Self {
            name,
            reference: reference.into(),
            format,
            storage,
        }
    }

    /// Returns the unique project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the original uploaded filename.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the content format.
    #[must_use]
    pub const fn format(&self) -> ProjectFormat {
        self.format
    }

    /// Returns the storage backend kind.
    #[must_use]
    pub const fn storage(&self) -> StorageKind {
        self.storage
    }
}
