//! In-memory repository for project metadata.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Project, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
///
/// One lock guards the whole map: lookups share it, stores hold it
/// exclusively for the check and the insert.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectName, Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn safe_store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if projects.contains_key(project.name()) {
            return Err(ProjectRepositoryError::AlreadyExists(
                project.name().clone(),
            ));
        }

        projects.insert(project.name().clone(), project.clone());
        Ok(())
    }

    async fn find(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>> {
        let projects = self.projects.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(projects.get(name).cloned())
    }

    async fn find_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let projects = self.projects.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(projects.values().cloned().collect())
    }
}
