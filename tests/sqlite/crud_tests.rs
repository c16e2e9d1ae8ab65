//! Basic CRUD operation tests for the `SQLite` task repository.

use chrono::Duration;
use mockable::DefaultClock;
use rstest::rstest;
use tasktrack::task::{
    adapters::sqlite::SqliteTaskRepository,
    domain::{
        CommitBy, CreationOrder, LabelColor, PersistedTaskData, StatusFilter, Task, TaskChanges,
        TaskId, TaskTitle, timestamp,
    },
    ports::{TaskRepository, TaskRepositoryError},
};

use crate::sqlite::helpers::{ScratchDatabase, clock, draft, repository};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_assigns_ids_and_round_trips_every_field(
    repository: SqliteTaskRepository,
    clock: DefaultClock,
) {
    let commit_by = CommitBy::parse("2024-03-15").expect("valid date");
    let first = repository
        .insert(
            &draft("Book dentist", &clock)
                .with_notes("ask about Tuesdays")
                .with_commit_by(Some(commit_by))
                .with_label_color(Some(LabelColor::Emerald)),
        )
        .await
        .expect("insert should succeed");
    let second = repository
        .insert(&draft("Second", &clock))
        .await
        .expect("insert should succeed");

    assert_eq!(first.id(), TaskId::new(1));
    assert_eq!(second.id(), TaskId::new(2));
    assert_eq!(first.created_at(), first.updated_at());
    assert!(!first.is_completed());

    let fetched = repository
        .find_by_id(first.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(fetched, first);
    assert_eq!(fetched.commit_by(), Some(commit_by));
    assert_eq!(fetched.label_color(), Some(LabelColor::Emerald));
    assert_eq!(fetched.notes(), "ask about Tuesdays");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_persists_changes(repository: SqliteTaskRepository, clock: DefaultClock) {
    let mut task = repository
        .insert(
            &draft("Original", &clock).with_label_color(Some(LabelColor::Amber)),
        )
        .await
        .expect("insert should succeed");

    task.apply(
        TaskChanges::new()
            .with_title(TaskTitle::new("Renamed").expect("valid title"))
            .with_completed(true)
            .with_label_color(None),
        &clock,
    );
    repository.update(&task).await.expect("update should succeed");

    let fetched = repository
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(fetched, task);
    assert_eq!(fetched.label_color(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_report_missing_rows(repository: SqliteTaskRepository) {
    let ghost = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(404),
        title: TaskTitle::new("ghost").expect("valid title"),
        notes: String::new(),
        commit_by: None,
        completed: false,
        label_color: None,
        created_at: timestamp::now(&DefaultClock),
        updated_at: timestamp::now(&DefaultClock),
    });

    let updated = repository.update(&ghost).await;
    assert!(matches!(updated, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));
    let deleted = repository.delete(ghost.id()).await;
    assert!(matches!(deleted, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_ids_are_never_reused(repository: SqliteTaskRepository, clock: DefaultClock) {
    let first = repository
        .insert(&draft("one", &clock))
        .await
        .expect("insert should succeed");
    let second = repository
        .insert(&draft("two", &clock))
        .await
        .expect("insert should succeed");
    repository.delete(second.id()).await.expect("delete succeeds");

    let third = repository
        .insert(&draft("three", &clock))
        .await
        .expect("insert should succeed");

    assert!(third.id() > second.id());
    let gone = repository
        .find_by_id(second.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(gone, None);
    assert!(
        repository
            .find_by_id(first.id())
            .await
            .expect("lookup should succeed")
            .is_some()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_survive_reopening_the_database_file(clock: DefaultClock) {
    let scratch = ScratchDatabase::new("reopen");
    let created = {
        let repository = SqliteTaskRepository::open(&scratch.url()).expect("open database file");
        let mut task = repository
            .insert(&draft("Persist me", &clock).with_notes("across restarts"))
            .await
            .expect("insert should succeed");
        task.apply(TaskChanges::new().with_completed(true), &clock);
        repository.update(&task).await.expect("update should succeed");
        task
    };

    let reopened = SqliteTaskRepository::open(&scratch.url()).expect("reopen database file");
    let fetched = reopened
        .find_by_id(created.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");

    assert_eq!(fetched, created);
    assert!(fetched.updated_at() - fetched.created_at() >= Duration::zero());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_inserts_on_a_file_database_all_commit(clock: DefaultClock) {
    let scratch = ScratchDatabase::new("concurrent");
    let repository =
        std::sync::Arc::new(SqliteTaskRepository::open(&scratch.url()).expect("open database"));

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let repository = std::sync::Arc::clone(&repository);
            let task_draft = draft(&format!("parallel {index}"), &clock);
            tokio::spawn(async move { repository.insert(&task_draft).await })
        })
        .collect();
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(
            handle
                .await
                .expect("join task")
                .expect("insert should succeed")
                .id(),
        );
    }

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}

fn seed_raw(url: &str, sql: &str) {
    use diesel::{Connection, connection::SimpleConnection, sqlite::SqliteConnection};

    let mut connection = SqliteConnection::establish(url).expect("open raw connection");
    connection.batch_execute(sql).expect("seed raw rows");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unlabelled_legacy_table_is_upgraded_on_open(clock: DefaultClock) {
    let scratch = ScratchDatabase::new("legacy");
    seed_raw(
        &scratch.url(),
        "CREATE TABLE tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            notes TEXT DEFAULT '',
            commit_by TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0
        );
        INSERT INTO tasks (title, notes, commit_by, created_at, updated_at, completed) VALUES
            ('Old task', 'from before labels', '2024-01-02',
             '2024-01-01T08:00:00.000Z', '2024-01-01T08:00:00.000Z', 1),
            ('Bad month', '', '2024-13-40',
             '2024-01-01T08:00:01.000Z', '2024-01-01T08:00:01.000Z', 0),
            ('', NULL, '2023-02-29',
             '2024-01-01T08:00:02.000Z', '2024-01-01T08:00:02.000Z', 0);",
    );

    let repository = SqliteTaskRepository::open(&scratch.url()).expect("open legacy database");
    let listed = repository
        .list(StatusFilter::All, CreationOrder::OldestFirst)
        .await
        .expect("legacy rows should list");

    let summary: Vec<_> = listed
        .iter()
        .map(|task| {
            (
                task.id().value(),
                task.title().as_str(),
                task.notes(),
                task.commit_by().map(|date| date.to_string()),
            )
        })
        .collect();
    assert_eq!(
        summary,
        [
            (2, "Bad month", "", None),
            (3, "Untitled", "", None),
            (
                1,
                "Old task",
                "from before labels",
                Some("2024-01-02".to_owned())
            ),
        ]
    );
    let old = listed.last().expect("completed legacy task");
    assert_eq!(old.label_color(), None);
    assert!(old.is_completed());
    assert_eq!(timestamp::format(old.created_at()), "2024-01-01T08:00:00.000Z");

    let labelled = repository
        .insert(&draft("New task", &clock).with_label_color(Some(LabelColor::Sapphire)))
        .await
        .expect("insert should succeed");
    assert_eq!(labelled.id(), TaskId::new(4));
    assert_eq!(labelled.label_color(), Some(LabelColor::Sapphire));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreadable_stored_values_do_not_hide_other_tasks(clock: DefaultClock) {
    let scratch = ScratchDatabase::new("unreadable");
    let repository = SqliteTaskRepository::open(&scratch.url()).expect("open database file");
    let good = repository
        .insert(&draft("Readable", &clock))
        .await
        .expect("insert should succeed");
    seed_raw(
        &scratch.url(),
        "INSERT INTO tasks (title, notes, commit_by, created_at, updated_at, completed)
         VALUES ('   ', '', 'someday',
                 '2024-01-01T08:00:00.000Z', '2024-01-01T08:00:00.000Z', 0);",
    );

    let listed = repository
        .list(StatusFilter::All, CreationOrder::OldestFirst)
        .await
        .expect("listing should survive unreadable values");

    assert_eq!(listed.len(), 2);
    let damaged = listed
        .iter()
        .find(|task| task.id() != good.id())
        .expect("damaged row is still listed");
    assert_eq!(damaged.title().as_str(), "Untitled");
    assert_eq!(damaged.commit_by(), None);
}
