//! Read-side service for project lookup.

use crate::error::ErrorKind;
use crate::project::{
    domain::{Project, ProjectDomainError, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Service-level errors for project lookup.
#[derive(Debug, Error)]
pub enum GetProjectError {
    /// The service was built without a project repository.
    #[error("project repository not initialized")]
    RepositoryNotInitialized,
    /// No project identifier was supplied.
    #[error("project identifier not provided")]
    ProjectNotProvided,
    /// The identifier is not a valid project name.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// The project could not be found.
    #[error("project not found: {0}")]
    ProjectNotFound(#[source] ProjectRepositoryError),
    /// The project list could not be read.
    #[error("failed to list projects: {0}")]
    Listing(#[source] ProjectRepositoryError),
}

impl GetProjectError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RepositoryNotInitialized => ErrorKind::NotInitialized,
            Self::ProjectNotProvided | Self::Domain(ProjectDomainError::EmptyProjectName) => {
                ErrorKind::NotProvided
            }
            Self::Domain(_) => ErrorKind::NotSupported,
            Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::Listing(_) => ErrorKind::Storing,
        }
    }
}

/// Result type for project lookup.
pub type GetProjectResult<T> = Result<T, GetProjectError>;

/// Project lookup service.
#[derive(Clone)]
pub struct GetProjectService<R>
where
    R: ProjectRepository,
{
    repository: Option<Arc<R>>,
}

impl<R> GetProjectService<R>
where
    R: ProjectRepository,
{
    /// Creates a wired lookup service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self {
            repository: Some(repository),
        }
    }

    /// Returns the project with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`GetProjectError::ProjectNotFound`] when no project has the
    /// name, or a `NotProvided`/`NotInitialized` error for bad input or
    /// wiring.
    pub async fn get(&self, name: &str) -> GetProjectResult<Project> {
        let repository = self.repository()?;
        if name.trim().is_empty() {
            error!("project lookup without identifier");
            return Err(GetProjectError::ProjectNotProvided);
        }
        let project_name = ProjectName::new(name)
            .inspect_err(|err| error!(project = name, error = %err, "invalid project name"))?;

        let found = repository
            .find(&project_name)
            .await
            .and_then(|found| {
                found.ok_or_else(|| ProjectRepositoryError::NotFound(project_name.clone()))
            })
            .map_err(GetProjectError::ProjectNotFound)
            .inspect_err(|err| {
                error!(project = %project_name, error = %err, "project lookup failed");
            })?;

        debug!(project = %project_name, "project found");
        Ok(found)
    }

    /// Returns all registered projects ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`GetProjectError::Listing`] when the repository fails.
    pub async fn list(&self) -> GetProjectResult<Vec<Project>> {
        let repository = self.repository()?;
        let mut projects = repository
            .find_all()
            .await
            .map_err(GetProjectError::Listing)
            .inspect_err(|err| error!(error = %err, "project listing failed"))?;
        projects.sort_by(|left, right| left.name().cmp(right.name()));
        debug!(count = projects.len(), "projects listed");
        Ok(projects)
    }

    fn repository(&self) -> GetProjectResult<&Arc<R>> {
        self.repository.as_ref().ok_or_else(|| {
            error!("project repository not initialized");
            GetProjectError::RepositoryNotInitialized
        })
    }
}

impl<R> Default for GetProjectService<R>
where
    R: ProjectRepository,
{
    fn default() -> Self {
        Self { repository: None }
    }
}
