//! When steps for task dispatch BDD scenarios.

use super::world::{TaskDispatchWorld, run_async};
use playbook_deck::{
    project::services::CreateProjectRequest,
    task::{domain::AnsiblePlaybookParameters, services::CreateTaskRequest},
};
use rstest_bdd_macros::when;

#[when(r#"a "{playbook}" playbook task is created for project "{project}""#)]
fn create_playbook_task(
    world: &mut TaskDispatchWorld,
    playbook: String,
    project: String,
) -> Result<(), eyre::Report> {
    let parameters = AnsiblePlaybookParameters::new(playbook)?;
    let app = world.app()?;
    let task = app.new_task(&project, parameters.into())?;
    let task_id = task.id().to_string();

    let result = run_async(
        app.create_task()
            .create(CreateTaskRequest::new(project).with_task(task)),
    );

    world.last_task_id = Some(task_id);
    world.last_create_task = Some(result);
    Ok(())
}

#[when(r#"the project is uploaded again as "{filename}" with format "{format}" on "{storage}" storage"#)]
fn upload_again(
    world: &mut TaskDispatchWorld,
    filename: String,
    format: String,
    storage: String,
) -> Result<(), eyre::Report> {
    let request =
        CreateProjectRequest::new(format, storage, filename).with_content(&b"other-bytes"[..]);
    let result = run_async(world.app()?.create_project().create(request));
    world.last_upload = Some(result);
    Ok(())
}
