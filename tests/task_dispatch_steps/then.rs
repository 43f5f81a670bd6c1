//! Then steps for task dispatch BDD scenarios.

use std::time::Duration;

use super::world::{TaskDispatchWorld, run_async};
use playbook_deck::task::domain::{Task, TaskStatus};
use rstest_bdd_macros::then;

fn last_task_id(world: &TaskDispatchWorld) -> Result<&str, eyre::Report> {
    world
        .last_task_id
        .as_deref()
        .ok_or_else(|| eyre::eyre!("missing task identifier in scenario world"))
}

fn fetch_task(world: &TaskDispatchWorld) -> Result<Task, eyre::Report> {
    let id = last_task_id(world)?;
    run_async(world.app()?.get_task().get(id)).map_err(eyre::Report::from)
}

#[then(r#"the task finishes with status "{status}""#)]
fn task_finishes_with_status(
    world: &TaskDispatchWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    for _ in 0..500 {
        let task = fetch_task(world)?;
        if task.status().is_terminal() {
            eyre::ensure!(
                task.status() == expected,
                "expected status {expected}, found {}",
                task.status()
            );
            return Ok(());
        }
        run_async(tokio::time::sleep(Duration::from_millis(10)));
    }
    Err(eyre::eyre!("task did not reach a terminal status"))
}

#[then(r#"the task is bound to project "{project}""#)]
fn task_is_bound(world: &TaskDispatchWorld, project: String) -> Result<(), eyre::Report> {
    let task = fetch_task(world)?;
    let Some(bound) = task.project() else {
        return Err(eyre::eyre!("task {} has no bound project", task.id()));
    };
    eyre::ensure!(
        bound.name().as_str() == project,
        "expected project {project}, found {}",
        bound.name()
    );
    Ok(())
}

#[then(r#"the task is recorded as "{status}""#)]
fn task_is_recorded_as(world: &TaskDispatchWorld, status: String) -> Result<(), eyre::Report> {
    let task = fetch_task(world)?;
    eyre::ensure!(
        task.status().as_str() == status,
        "expected status {status}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"task creation fails with kind "{kind}""#)]
fn task_creation_fails(world: &TaskDispatchWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_create_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task creation result"))?;
    match result {
        Err(err) if err.kind().as_str() == kind => Ok(()),
        other => Err(eyre::eyre!("expected {kind} error, got {other:?}")),
    }
}

#[then(r#"the upload fails with kind "{kind}""#)]
fn upload_fails(world: &TaskDispatchWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_upload
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing upload result"))?;
    match result {
        Err(err) if err.kind().as_str() == kind => Ok(()),
        other => Err(eyre::eyre!("expected {kind} error, got {other:?}")),
    }
}
