//! Service layer for registering projects and persisting their content.

use crate::error::ErrorKind;
use crate::project::{
    domain::{
        Project, ProjectDomainError, ProjectFormat, ProjectName, StorageKind,
        ensure_supported_extension,
    },
    ports::{
        ContentReader, ProjectRepository, ProjectRepositoryError, SourceStorageError,
        StorageFactory,
    },
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncRead;
use tracing::{debug, error, info};

/// Request payload for registering a project.
pub struct CreateProjectRequest {
    format: String,
    storage: String,
    filename: String,
    content: Option<ContentReader>,
}

impl CreateProjectRequest {
    /// Creates a request without content.
    #[must_use]
    pub fn new(
        format: impl Into<String>,
        storage: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            format: format.into(),
            storage: storage.into(),
            filename: filename.into(),
            content: None,
        }
    }

    /// Sets the content stream to persist.
    #[must_use]
    pub fn with_content(mut self, content: impl AsyncRead + Send + Unpin + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }
}

impl fmt::Debug for CreateProjectRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateProjectRequest")
            .field("format", &self.format)
            .field("storage", &self.storage)
            .field("filename", &self.filename)
            .field("has_content", &self.content.is_some())
            .finish()
    }
}

/// Service-level errors for project registration.
#[derive(Debug, Error)]
pub enum CreateProjectError {
    /// The content format was empty.
    #[error("project format not provided")]
    FormatNotProvided,
    /// The storage kind was empty.
    #[error("project storage not provided")]
    StorageNotProvided,
    /// No content stream was supplied.
    #[error("project content not provided")]
    ContentNotProvided,
    /// The filename was empty.
    #[error("project filename not provided")]
    FilenameNotProvided,
    /// The service was built without a storage factory.
    #[error("storage factory not initialized")]
    StorageFactoryNotInitialized,
    /// The service was built without a project repository.
    #[error("project repository not initialized")]
    RepositoryNotInitialized,
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// A project with the derived name is already registered.
    #[error("project '{0}' already exists")]
    ProjectAlreadyExists(ProjectName),
    /// No storage backend is registered for the requested kind.
    #[error("no storage handler registered for '{0}'")]
    StorageHandlerNotFound(StorageKind),
    /// The existence check could not be completed.
    #[error("failed to look up project: {0}")]
    Lookup(#[source] ProjectRepositoryError),
    /// Project metadata could not be persisted.
    #[error("failed to store project metadata: {0}")]
    StoringProject(#[source] ProjectRepositoryError),
    /// Project content could not be persisted.
    #[error("failed to store project content: {0}")]
    StoringContent(#[source] SourceStorageError),
}

impl CreateProjectError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FormatNotProvided
            | Self::StorageNotProvided
            | Self::ContentNotProvided
            | Self::FilenameNotProvided
            | Self::Domain(ProjectDomainError::EmptyProjectName) => ErrorKind::NotProvided,
            Self::Domain(_) => ErrorKind::NotSupported,
            Self::StorageFactoryNotInitialized
            | Self::RepositoryNotInitialized
            | Self::StorageHandlerNotFound(_) => ErrorKind::NotInitialized,
            Self::ProjectAlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::Lookup(_) | Self::StoringProject(_) | Self::StoringContent(_) => {
                ErrorKind::Storing
            }
        }
    }
}

/// Result type for project registration.
pub type CreateProjectResult<T> = Result<T, CreateProjectError>;

/// Project registration service.
///
/// Collaborators are optional so that a partially wired service reports a
/// `NotInitialized` error instead of failing at construction.
#[derive(Clone)]
pub struct CreateProjectService<F, R>
where
    F: StorageFactory,
    R: ProjectRepository,
{
    storage_factory: Option<Arc<F>>,
    repository: Option<Arc<R>>,
}

struct CheckedRequest<'a, F, R> {
    storage_factory: &'a Arc<F>,
    repository: &'a Arc<R>,
    project: Project,
    content: ContentReader,
}

impl<F, R> CreateProjectService<F, R>
where
    F: StorageFactory,
    R: ProjectRepository,
{
    /// Creates a fully wired service.
    #[must_use]
    pub const fn new(storage_factory: Arc<F>, repository: Arc<R>) -> Self {
        Self {
            storage_factory: Some(storage_factory),
            repository: Some(repository),
        }
    }

    /// Sets the storage factory.
    #[must_use]
    pub fn with_storage_factory(mut self, storage_factory: Arc<F>) -> Self {
        self.storage_factory = Some(storage_factory);
        self
    }

    /// Sets the project repository.
    #[must_use]
    pub fn with_repository(mut self, repository: Arc<R>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Registers a project and streams its content to the storage backend.
    ///
    /// Metadata is stored before content. When the content write fails the
    /// project stays registered and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CreateProjectError`] for missing or unsupported input,
    /// missing collaborators, a name collision, or a persistence failure.
    pub async fn create(&self, request: CreateProjectRequest) -> CreateProjectResult<Project> {
        let CreateProjectRequest {
            format,
            storage,
            filename,
            content,
        } = request;

        let checked = self
            .check_request(&format, &storage, &filename, content)
            .inspect_err(|err| {
                error!(
                    %format,
                    %storage,
                    %filename,
                    kind = %err.kind(),
                    error = %err,
                    "project request rejected"
                );
            })?;
        let CheckedRequest {
            storage_factory,
            repository,
            project,
            content: reader,
        } = checked;
        let name = project.name().clone();
        debug!(project = %name, "project request validated");

        let existing = repository
            .find(&name)
            .await
            .map_err(CreateProjectError::Lookup)
            .inspect_err(|err| error!(project = %name, error = %err, "project lookup failed"))?;
        if existing.is_some() {
            error!(project = %name, %filename, "project already exists");
            return Err(CreateProjectError::ProjectAlreadyExists(name));
        }

        let Some(storer) = storage_factory.get(project.storage()) else {
            error!(project = %name, storage = %project.storage(), "storage handler not found");
            return Err(CreateProjectError::StorageHandlerNotFound(project.storage()));
        };

        repository
            .safe_store(&project)
            .await
            .map_err(|err| match err {
                ProjectRepositoryError::AlreadyExists(taken) => {
                    CreateProjectError::ProjectAlreadyExists(taken)
                }
                other => CreateProjectError::StoringProject(other),
            })
            .inspect_err(|err| {
                error!(project = %name, error = %err, "project metadata not stored");
            })?;

        storer
            .store(&project, reader)
            .await
            .map_err(CreateProjectError::StoringContent)
            .inspect_err(|err| {
                error!(
                    project = %name,
                    storage = %project.storage(),
                    error = %err,
                    "project registered but its content was not stored"
                );
            })?;

        info!(
            project = %name,
            reference = project.reference(),
            format = %project.format(),
            storage = %project.storage(),
            "project created"
        );
        Ok(project)
    }

    fn check_request(
        &self,
        format: &str,
        storage: &str,
        filename: &str,
        content: Option<ContentReader>,
    ) -> CreateProjectResult<CheckedRequest<'_, F, R>> {
        if format.trim().is_empty() {
            return Err(CreateProjectError::FormatNotProvided);
        }
        if storage.trim().is_empty() {
            return Err(CreateProjectError::StorageNotProvided);
        }
        let reader = content.ok_or(CreateProjectError::ContentNotProvided)?;
        if filename.trim().is_empty() {
            return Err(CreateProjectError::FilenameNotProvided);
        }
        let storage_factory = self
            .storage_factory
            .as_ref()
            .ok_or(CreateProjectError::StorageFactoryNotInitialized)?;
        let repository = self
            .repository
            .as_ref()
            .ok_or(CreateProjectError::RepositoryNotInitialized)?;

        ensure_supported_extension(filename)?;
        let project_format = ProjectFormat::try_from(format)?;
        let storage_kind = StorageKind::try_from(storage)?;
        let name = ProjectName::from_filename(filename)?;

        Ok(CheckedRequest {
            storage_factory,
            repository,
            project: Project::new(name, filename, project_format, storage_kind),
            content: reader,
        })
    }
}

impl<F, R> Default for CreateProjectService<F, R>
where
    F: StorageFactory,
    R: ProjectRepository,
{
    fn default() -> Self {
        Self {
            storage_factory: None,
            repository: None,
        }
    }
}
