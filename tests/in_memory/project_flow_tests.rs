//! Project registration through the wired application.

use super::helpers::{process_app, project_request, test_app};
use playbook_deck::{
    error::{ErrorKind, ResponseClass},
    project::{
        domain::{ProjectFormat, StorageKind},
        services::CreateProjectError,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn local_project_is_written_and_readable() -> Result<(), eyre::Report> {
    let harness = test_app()?;

    let created = harness
        .app
        .create_project()
        .create(project_request("plain", "local", "demo.tar.gz", b"payload"))
        .await?;
    let fetched = harness.app.get_project().get("demo").await?;

    eyre::ensure!(fetched == created, "fetched project should match created one");
    eyre::ensure!(fetched.format() == ProjectFormat::Plain, "format should be plain");
    eyre::ensure!(fetched.storage() == StorageKind::Local, "storage should be local");
    let written = std::fs::read(harness.local_root.join("demo").join("demo.tar.gz"))?;
    eyre::ensure!(written == b"payload", "content should be written to disk");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_upload_of_a_name_conflicts() -> Result<(), eyre::Report> {
    let harness = test_app()?;
    harness
        .app
        .create_project()
        .create(project_request("targz", "memory", "site.tgz", b"one"))
        .await?;

    let duplicate = harness
        .app
        .create_project()
        .create(project_request("tar", "memory", "site.tar", b"two"))
        .await;

    let Err(err) = duplicate else {
        eyre::bail!("duplicate upload should fail");
    };
    eyre::ensure!(err.kind() == ErrorKind::AlreadyExists, "unexpected kind {}", err.kind());
    eyre::ensure!(
        err.kind().response_class() == ResponseClass::Conflict,
        "conflict should map to a conflict response"
    );
    Ok(())
}

#[rstest]
#[case::unknown_format("zip", "memory", "demo.tar", ErrorKind::NotSupported)]
#[case::unknown_storage("plain", "s3", "demo.tar", ErrorKind::NotSupported)]
#[case::unknown_extension("plain", "memory", "demo.rar", ErrorKind::NotSupported)]
#[case::missing_filename("plain", "memory", "", ErrorKind::NotProvided)]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_uploads_are_classified(
    #[case] format: &str,
    #[case] storage: &str,
    #[case] filename: &str,
    #[case] expected: ErrorKind,
) -> Result<(), eyre::Report> {
    let harness = test_app()?;

    let result = harness
        .app
        .create_project()
        .create(project_request(format, storage, filename, b""))
        .await;

    eyre::ensure!(
        result.as_ref().map_err(CreateProjectError::kind).err()
            == Some(expected),
        "unexpected outcome: {result:?}"
    );
    let listed = harness.app.get_project().list().await?;
    eyre::ensure!(listed.is_empty(), "rejected uploads must not be registered");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_lookup_is_not_found() -> Result<(), eyre::Report> {
    let harness = test_app()?;

    let result = harness.app.get_project().get("ghost").await;

    let Err(err) = result else {
        eyre::bail!("lookup of an unknown project should fail");
    };
    eyre::ensure!(err.kind() == ErrorKind::NotFound, "unexpected kind {}", err.kind());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_application_starts_empty_and_shuts_down() -> Result<(), eyre::Report> {
    let temp = tempfile::tempdir()?;
    let app = process_app(&temp)?;

    eyre::ensure!(app.get_project().list().await?.is_empty(), "no projects expected");
    eyre::ensure!(app.get_task().list().await?.is_empty(), "no tasks expected");
    app.shutdown().await?;
    Ok(())
}
