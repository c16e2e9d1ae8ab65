//! Listing order and filter tests for the `SQLite` task repository.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;
use tasktrack::task::{
    adapters::{memory::InMemoryTaskRepository, sqlite::SqliteTaskRepository},
    domain::{CreationOrder, StatusFilter, Task},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest},
};

use crate::sqlite::helpers::repository;

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}

/// Seeds A (due 03-10), B (due 03-05), C (undated), D (due 03-01, completed),
/// E (undated, completed) in that creation order.
async fn seed<R>(service: &TaskLifecycleService<R, DefaultClock>)
where
    R: TaskRepository,
{
    let seeds = [
        ("A", "2024-03-10", false),
        ("B", "2024-03-05", false),
        ("C", "", false),
        ("D", "2024-03-01", true),
        ("E", "", true),
    ];
    for (title, commit_by, completed) in seeds {
        let task = service
            .create(CreateTaskRequest::new(title).with_commit_by(commit_by))
            .await
            .expect("task creation should succeed");
        if completed {
            service
                .update(task.id(), UpdateTaskRequest::new().with_completed(true))
                .await
                .expect("update should succeed");
        }
    }
}

#[rstest]
#[case(StatusFilter::All, &["B", "A", "C", "D", "E"])]
#[case(StatusFilter::Active, &["B", "A", "C"])]
#[case(StatusFilter::Completed, &["D", "E"])]
#[tokio::test(flavor = "multi_thread")]
async fn listing_filters_and_orders(
    repository: SqliteTaskRepository,
    #[case] filter: StatusFilter,
    #[case] expected: &[&str],
) {
    let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock));
    seed(&service).await;

    let listed = service.list(filter).await.expect("list succeeds");

    assert_eq!(titles(&listed), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undated_ties_follow_creation_direction(repository: SqliteTaskRepository) {
    let repository = Arc::new(repository);
    let oldest_first = TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    for title in ["first", "second", "third"] {
        oldest_first
            .create(CreateTaskRequest::new(title))
            .await
            .expect("task creation should succeed");
    }
    let newest_first =
        oldest_first.clone().with_creation_order(CreationOrder::NewestFirst);

    let ascending = oldest_first.list(StatusFilter::All).await.expect("list succeeds");
    let descending = newest_first.list(StatusFilter::All).await.expect("list succeeds");

    assert_eq!(titles(&ascending), ["first", "second", "third"]);
    assert_eq!(titles(&descending), ["third", "second", "first"]);
}

#[rstest]
#[case(CreationOrder::OldestFirst)]
#[case(CreationOrder::NewestFirst)]
#[tokio::test(flavor = "multi_thread")]
async fn sqlite_and_memory_adapters_agree_on_order(
    repository: SqliteTaskRepository,
    #[case] order: CreationOrder,
) {
    let sqlite = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock))
        .with_creation_order(order);
    let memory =
        TaskLifecycleService::new(Arc::new(InMemoryTaskRepository::new()), Arc::new(DefaultClock))
            .with_creation_order(order);
    seed(&sqlite).await;
    seed(&memory).await;

    for filter in [StatusFilter::All, StatusFilter::Active, StatusFilter::Completed] {
        let from_sqlite = sqlite.list(filter).await.expect("list succeeds");
        let from_memory = memory.list(filter).await.expect("list succeeds");
        assert_eq!(
            titles(&from_sqlite),
            titles(&from_memory),
            "adapters disagree for {filter}"
        );
    }
}
