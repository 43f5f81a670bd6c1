//! Storage ports for persisting a project's raw source content.

use crate::project::domain::{Project, StorageKind};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Byte stream carrying uploaded project content. It is consumed once.
pub type ContentReader = Box<dyn AsyncRead + Send + Unpin>;

/// Result type for source storage operations.
pub type SourceStorageResult<T> = Result<T, SourceStorageError>;

/// Backend-specific persister of project content.
#[async_trait]
pub trait SourceCodeStorer: Send + Sync {
    /// Reads `content` to completion and persists it under the project's
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`SourceStorageError`] when the stream cannot be read or the
    /// backend rejects the write.
    async fn store(&self, project: &Project, content: ContentReader) -> SourceStorageResult<()>;
}

/// Resolves a storage kind to the storer handling it.
pub trait StorageFactory: Send + Sync {
    /// Returns the storer registered for `kind`, or `None` when no backend
    /// handles it.
    fn get(&self, kind: StorageKind) -> Option<Arc<dyn SourceCodeStorer>>;
}

/// Errors returned by source storage backends.
#[derive(Debug, Clone, Error)]
pub enum SourceStorageError {
    /// The content stream could not be read.
    #[error("failed to read project content: {0}")]
    Read(Arc<std::io::Error>),

    /// The project reference does not name a file.
    #[error("project reference '{0}' has no file name")]
    InvalidReference(String),

    /// The backend failed to persist the content.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl SourceStorageError {
    /// Wraps a content stream read error.
    #[must_use]
    pub fn read(err: std::io::Error) -> Self {
        Self::Read(Arc::new(err))
    }

    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
