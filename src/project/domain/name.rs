//! Validated project name type.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derives a project name from an uploaded filename.
///
/// The name is everything before the first `.`, so `project.tar.gz` and
/// `project.tar` both yield `project`.
#[must_use]
pub fn extract_project_name(filename: &str) -> &str {
    filename.split('.').next().unwrap_or_default()
}

/// Unique project identifier.
///
/// Names key the project repository and the storage backends, so they never
/// contain path separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the value is
    /// empty after trimming, or [`ProjectDomainError::InvalidProjectName`]
    /// when it contains `/` or `\`.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }

        if normalized.contains(['/', '\\']) {
            return Err(ProjectDomainError::InvalidProjectName(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Derives and validates the project name for an uploaded filename.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ProjectName::new`].
    pub fn from_filename(filename: &str) -> Result<Self, ProjectDomainError> {
        Self::new(extract_project_name(filename))
    }

    /// Returns the project name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
