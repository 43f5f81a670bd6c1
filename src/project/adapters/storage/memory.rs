//! In-memory source storage backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::io::AsyncReadExt;

use crate::project::{
    domain::{Project, ProjectName},
    ports::{ContentReader, SourceCodeStorer, SourceStorageError, SourceStorageResult},
};

/// Keeps project content in process memory, keyed by project name.
#[derive(Debug, Clone, Default)]
pub struct InMemorySourceStorage {
    contents: Arc<RwLock<HashMap<ProjectName, Vec<u8>>>>,
}

impl InMemorySourceStorage {
    /// Creates an empty storage backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the content stored for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceStorageError::Backend`] when lock acquisition fails.
    pub fn content(&self, name: &ProjectName) -> SourceStorageResult<Option<Vec<u8>>> {
        let contents = self
            .contents
            .read()
            .map_err(|err| SourceStorageError::backend(std::io::Error::other(err.to_string())))?;
        Ok(contents.get(name).cloned())
    }
}

#[async_trait]
impl SourceCodeStorer for InMemorySourceStorage {
    async fn store(&self, project: &Project, mut content: ContentReader) -> SourceStorageResult<()> {
        let mut bytes = Vec::new();
        content
            .read_to_end(&mut bytes)
            .await
            .map_err(SourceStorageError::read)?;

        let mut contents = self
            .contents
            .write()
            .map_err(|err| SourceStorageError::backend(std::io::Error::other(err.to_string())))?;
        contents.insert(project.name().clone(), bytes);
        Ok(())
    }
}
