//! When steps for task listing BDD scenarios.

use super::world::{TaskListingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasktrack::task::{
    domain::StatusFilter,
    services::{CreateTaskRequest, UpdateTaskRequest},
};

#[when(r#"the "{status}" tasks are listed"#)]
fn list_tasks(world: &mut TaskListingWorld, status: String) -> Result<(), eyre::Report> {
    let filter = StatusFilter::from_query(Some(&status));
    let listing = run_async(world.service.list(filter)).wrap_err("list tasks")?;
    world.last_listing = Some(listing);
    Ok(())
}

#[when(r#"the commit-by date of "{title}" is cleared"#)]
fn clear_commit_by(world: &mut TaskListingWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.id_of(&title)?;
    run_async(
        world
            .service
            .update(id, UpdateTaskRequest::new().with_commit_by(None)),
    )
    .wrap_err("clear commit-by date")?;
    Ok(())
}

#[when(r#"creating a task "{title}" due "{commit_by}" is attempted"#)]
fn attempt_create(world: &mut TaskListingWorld, title: String, commit_by: String) {
    let request = CreateTaskRequest::new(title).with_commit_by(commit_by);
    world.last_create_result = Some(run_async(world.service.create(request)));
}
