//! Port contracts for project registration.
//!
//! Ports define infrastructure-agnostic interfaces used by project services.

pub mod repository;
pub mod storage;

pub use repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
pub use storage::{
    ContentReader, SourceCodeStorer, SourceStorageError, SourceStorageResult, StorageFactory,
};
