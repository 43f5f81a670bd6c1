//! Repository port for project metadata persistence and lookup.

use crate::project::domain::{Project, ProjectName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
///
/// Implementations must be safe to share between concurrent callers.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a project keyed by its name.
    ///
    /// The existence check and the insert are a single atomic step, so two
    /// concurrent stores of the same name never both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::AlreadyExists`] when a project with
    /// the same name is already stored.
    async fn safe_store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by name.
    ///
    /// Returns `None` when the project does not exist.
    async fn find(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns a snapshot of all stored projects in no particular order.
    async fn find_all(&self) -> ProjectRepositoryResult<Vec<Project>>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same name already exists.
    #[error("project already exists: {0}")]
    AlreadyExists(ProjectName),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectName),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
