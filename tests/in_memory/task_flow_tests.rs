//! Task creation and completion through the wired application.

use super::helpers::{playbook, process_app, project_request, test_app, wait_for_terminal};
use playbook_deck::{
    error::ErrorKind,
    task::{domain::TaskStatus, services::CreateTaskRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_runs_against_stored_project() -> Result<(), eyre::Report> {
    let harness = test_app()?;
    harness
        .app
        .create_project()
        .create(project_request("plain", "local", "demo.tar.gz", b"archive"))
        .await?;
    let task = harness.app.new_task("demo", playbook("site.yml")?)?;
    let task_id = task.id().to_string();

    let created = harness
        .app
        .create_task()
        .create(CreateTaskRequest::new("demo").with_task(task))
        .await?;
    eyre::ensure!(
        created.project().is_some_and(|project| project.name().as_str() == "demo"),
        "created task should be bound to demo"
    );

    let finished = wait_for_terminal(harness.app.get_task(), &task_id).await?;
    eyre::ensure!(
        finished.status() == TaskStatus::Succeeded,
        "expected succeeded, found {}",
        finished.status()
    );
    eyre::ensure!(
        finished.project().is_some_and(|project| project.name().as_str() == "demo"),
        "finished task should keep its project"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_run_is_published_as_failed() -> Result<(), eyre::Report> {
    let harness = test_app()?;
    harness
        .app
        .create_project()
        .create(project_request("plain", "memory", "demo.yml", b"- hosts: all"))
        .await?;
    let task = harness.app.new_task("demo", playbook("fail.yml")?)?;
    let task_id = task.id().to_string();

    harness
        .app
        .create_task()
        .create(CreateTaskRequest::new("demo").with_task(task))
        .await?;

    let finished = wait_for_terminal(harness.app.get_task(), &task_id).await?;
    eyre::ensure!(finished.status() == TaskStatus::Failed, "task should fail");
    eyre::ensure!(
        finished.failure().is_some_and(|reason| reason.contains("stub failure")),
        "failure reason should carry the runner's stderr"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_for_unknown_project_stays_pending() -> Result<(), eyre::Report> {
    let harness = test_app()?;
    let task = harness.app.new_task("ghost", playbook("site.yml")?)?;
    let task_id = task.id().to_string();

    let result = harness
        .app
        .create_task()
        .create(CreateTaskRequest::new("ghost").with_task(task))
        .await;

    let Err(err) = result else {
        eyre::bail!("task for an unknown project should fail");
    };
    eyre::ensure!(err.kind() == ErrorKind::NotFound, "unexpected kind {}", err.kind());
    let stored = harness.app.get_task().get(&task_id).await?;
    eyre::ensure!(stored.status() == TaskStatus::Pending, "task should stay pending");
    eyre::ensure!(stored.project().is_none(), "task should stay unbound");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn shutdown_drains_admitted_tasks() -> Result<(), eyre::Report> {
    let harness = test_app()?;
    harness
        .app
        .create_project()
        .create(project_request("plain", "memory", "demo.yml", b"- hosts: all"))
        .await?;
    for _ in 0..3 {
        let task = harness.app.new_task("demo", playbook("slow.yml")?)?;
        harness
            .app
            .create_task()
            .create(CreateTaskRequest::new("demo").with_task(task))
            .await?;
    }
    let get_task = harness.app.get_task().clone();

    harness.app.shutdown().await?;

    let listed = get_task.list().await?;
    eyre::ensure!(listed.len() == 3, "all tasks should be listed");
    for task in &listed {
        eyre::ensure!(
            task.status() == TaskStatus::Succeeded,
            "task {} is {} after shutdown",
            task.id(),
            task.status()
        );
    }
    Ok(())
}

#[rstest]
#[case::targz("demo.tar.gz", "targz")]
#[case::tar("demo.tar", "tar")]
#[tokio::test(flavor = "multi_thread")]
async fn archive_project_run_fails_with_a_clear_reason(
    #[case] filename: &str,
    #[case] format: &str,
) -> Result<(), eyre::Report> {
    let temp = tempfile::tempdir()?;
    let app = process_app(&temp)?;
    app.create_project()
        .create(project_request(format, "local", filename, b"archive-bytes"))
        .await?;
    let task = app.new_task("demo", playbook("site.yml")?)?;
    let task_id = task.id().to_string();

    app.create_task()
        .create(CreateTaskRequest::new("demo").with_task(task))
        .await?;

    let finished = wait_for_terminal(app.get_task(), &task_id).await?;
    eyre::ensure!(finished.status() == TaskStatus::Failed, "archive run should fail");
    eyre::ensure!(
        finished
            .failure()
            .is_some_and(|reason| reason.contains("cannot run") && reason.contains(format)),
        "unexpected failure reason {:?}",
        finished.failure()
    );
    app.shutdown().await?;
    Ok(())
}
