//! Given steps for task listing BDD scenarios.

use super::world::{TaskListingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasktrack::task::services::{CreateTaskRequest, UpdateTaskRequest};

fn create(
    world: &mut TaskListingWorld,
    request: CreateTaskRequest,
    title: String,
) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(request))
        .wrap_err_with(|| format!("create task {title:?} for listing scenario"))?;
    world.ids_by_title.insert(title, created.id());
    Ok(())
}

#[given(r#"a task "{title}" due "{commit_by}""#)]
fn dated_task(
    world: &mut TaskListingWorld,
    title: String,
    commit_by: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title.clone()).with_commit_by(commit_by);
    create(world, request, title)
}

#[given(r#"an undated task "{title}""#)]
fn undated_task(world: &mut TaskListingWorld, title: String) -> Result<(), eyre::Report> {
    create(world, CreateTaskRequest::new(title.clone()), title)
}

#[given(r#"a completed task "{title}" due "{commit_by}""#)]
fn completed_task(
    world: &mut TaskListingWorld,
    title: String,
    commit_by: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title.clone()).with_commit_by(commit_by);
    create(world, request, title.clone())?;
    let id = world.id_of(&title)?;
    run_async(
        world
            .service
            .update(id, UpdateTaskRequest::new().with_completed(true)),
    )
    .wrap_err("complete task in scenario setup")?;
    Ok(())
}
