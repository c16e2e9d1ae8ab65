//! Then steps for task listing BDD scenarios.

use super::world::{TaskListingWorld, run_async};
use rstest_bdd_macros::then;
use tasktrack::task::{
    domain::{StatusFilter, TaskDomainError},
    services::TaskLifecycleError,
};

#[then(r#"the listed titles are "{expected}""#)]
fn listed_titles_are(world: &TaskListingWorld, expected: String) -> Result<(), eyre::Report> {
    let listing = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing"))?;
    let actual: Vec<&str> = listing.iter().map(|task| task.title().as_str()).collect();
    let wanted: Vec<&str> = expected.split(',').map(str::trim).collect();

    if actual != wanted {
        return Err(eyre::eyre!("expected titles {wanted:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("creation fails with an invalid commit-by error")]
fn creation_fails_with_invalid_commit_by(world: &TaskListingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::InvalidCommitBy(_)))
    ) {
        return Err(eyre::eyre!("expected InvalidCommitBy error, got {result:?}"));
    }
    Ok(())
}

#[then("the store holds no tasks")]
fn store_holds_no_tasks(world: &TaskListingWorld) -> Result<(), eyre::Report> {
    let listing = run_async(world.service.list(StatusFilter::All))?;
    if !listing.is_empty() {
        return Err(eyre::eyre!("expected no tasks, found {}", listing.len()));
    }
    Ok(())
}
