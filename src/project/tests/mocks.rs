//! Port mocks for verifying collaborator calls.

use std::sync::Arc;

use crate::project::{
    domain::{Project, ProjectName, StorageKind},
    ports::{
        ContentReader, ProjectRepository, ProjectRepositoryResult, SourceCodeStorer,
        SourceStorageError, SourceStorageResult, StorageFactory,
    },
};
use async_trait::async_trait;
use mockall::mock;

mock! {
    pub ProjectRepo {}

    #[async_trait]
    impl ProjectRepository for ProjectRepo {
        async fn safe_store(&self, project: &Project) -> ProjectRepositoryResult<()>;
        async fn find(&self, name: &ProjectName) -> ProjectRepositoryResult<Option<Project>>;
        async fn find_all(&self) -> ProjectRepositoryResult<Vec<Project>>;
    }
}

mock! {
    pub Factory {}

    impl StorageFactory for Factory {
        fn get(&self, kind: StorageKind) -> Option<Arc<dyn SourceCodeStorer>>;
    }
}

/// Storer whose backend always rejects the write.
#[derive(Debug, Default)]
pub struct FailingStorer;

#[async_trait]
impl SourceCodeStorer for FailingStorer {
    async fn store(&self, _project: &Project, _content: ContentReader) -> SourceStorageResult<()> {
        Err(SourceStorageError::backend(std::io::Error::other(
            "disk full",
        )))
    }
}

/// Repository and factory mocks that fail the test on any call.
pub fn untouched_collaborators() -> (MockFactory, MockProjectRepo) {
    let mut factory = MockFactory::new();
    factory.expect_get().never();

    let mut repository = MockProjectRepo::new();
    repository.expect_safe_store().never();
    repository.expect_find().never();
    repository.expect_find_all().never();

    (factory, repository)
}
