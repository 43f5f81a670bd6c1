//! Local filesystem source storage backend.
//!
//! Content is written to `<root>/<project name>/<file name>`. Writes go
//! through a `cap_std` directory handle opened on the root, so a hostile
//! reference cannot escape it. Uploads are copied to disk in fixed-size
//! chunks rather than buffered whole.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};

use crate::project::{
    domain::{Project, ProjectName},
    ports::{ContentReader, SourceCodeStorer, SourceStorageError, SourceStorageResult},
};

const CHUNK_SIZE: usize = 64 * 1024;

/// Stores project content beneath a root directory.
#[derive(Debug, Clone)]
pub struct LocalSourceStorage {
    root: Utf8PathBuf,
}

impl LocalSourceStorage {
    /// Creates a backend rooted at `root`. The directory is created on first
    /// write.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory holding the content of `name`.
    #[must_use]
    pub fn project_dir(&self, name: &ProjectName) -> Utf8PathBuf {
        self.root.join(name.as_str())
    }
}

#[async_trait]
impl SourceCodeStorer for LocalSourceStorage {
    async fn store(&self, project: &Project, mut content: ContentReader) -> SourceStorageResult<()> {
        let file_name = Utf8Path::new(project.reference())
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| SourceStorageError::InvalidReference(project.reference().to_owned()))?;

        let root = self.root.clone();
        let name = project.name().clone();
        let created_name = file_name.clone();
        let created =
            tokio::task::spawn_blocking(move || create_project_file(&root, &name, &created_name))
                .await
                .map_err(SourceStorageError::backend)?
                .map_err(SourceStorageError::backend)?;
        let mut file = tokio::fs::File::from_std(created.into_std());

        let path = self.project_dir(project.name()).join(&file_name);
        if let Err(err) = copy_content(&mut content, &mut file).await {
            drop(file);
            if let Err(cleanup) = tokio::fs::remove_file(&path).await {
                warn!(%path, error = %cleanup, "partial project file not removed");
            }
            return Err(err);
        }
        debug!(project = %project.name(), %path, "project content written");
        Ok(())
    }
}

fn create_project_file(root: &Utf8Path, name: &ProjectName, file_name: &str) -> std::io::Result<File> {
    Dir::create_ambient_dir_all(root, ambient_authority())?;
    let root_dir = Dir::open_ambient_dir(root, ambient_authority())?;
    root_dir.create_dir_all(name.as_str())?;
    let project_dir = root_dir.open_dir(name.as_str())?;
    project_dir.create(file_name)
}

async fn copy_content(content: &mut ContentReader, file: &mut tokio::fs::File) -> SourceStorageResult<()> {
    let mut chunk = vec![0_u8; CHUNK_SIZE];
    loop {
        let read = content
            .read(&mut chunk)
            .await
            .map_err(SourceStorageError::read)?;
        if read == 0 {
            break;
        }
        let filled = chunk.get(..read).ok_or_else(|| {
            SourceStorageError::read(std::io::Error::other("reader reported more bytes than requested"))
        })?;
        file.write_all(filled)
            .await
            .map_err(SourceStorageError::backend)?;
    }
    file.flush().await.map_err(SourceStorageError::backend)
}
