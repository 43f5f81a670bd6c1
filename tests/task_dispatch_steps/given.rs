//! Given steps for task dispatch BDD scenarios.

use super::world::{TaskDispatchWorld, run_async};
use eyre::WrapErr;
use playbook_deck::project::services::CreateProjectRequest;
use rstest_bdd_macros::given;

#[given("a running application")]
fn running_application(world: &mut TaskDispatchWorld) -> Result<(), eyre::Report> {
    world.start()
}

#[given(r#"a project uploaded as "{filename}" with format "{format}" on "{storage}" storage"#)]
fn project_uploaded(
    world: &mut TaskDispatchWorld,
    filename: String,
    format: String,
    storage: String,
) -> Result<(), eyre::Report> {
    let request =
        CreateProjectRequest::new(format, storage, filename).with_content(&b"archive-bytes"[..]);
    let created = run_async(world.app()?.create_project().create(request))
        .wrap_err("upload project in scenario setup")?;
    world.last_upload = Some(Ok(created));
    Ok(())
}
