//! `SQLite` repository implementation for task storage.

use super::{
    models::{LabelColumnCount, NewTaskRow, TaskChangesetRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        CommitBy, CreationOrder, LabelColor, PersistedTaskData, StatusFilter, Task, TaskDraft,
        TaskId, TaskTitle, timestamp,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;

/// `SQLite` connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Database URL selecting a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Schema applied to every pooled connection.
///
/// `migrations/` ships inside the crate package, so the path resolves from the
/// packaged sources as well as from a checkout.
const CREATE_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_tasks/up.sql");

/// Per-connection settings: a bounded wait on locks, then write-ahead logging.
const CONNECTION_PRAGMAS_SQL: &str = "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL;";

/// Tables created before labels existed lack this column.
const LABEL_COLUMN_COUNT_SQL: &str =
    "SELECT COUNT(*) AS count FROM pragma_table_info('tasks') WHERE name = 'label_color'";
const ADD_LABEL_COLUMN_SQL: &str = "ALTER TABLE tasks ADD COLUMN label_color TEXT";

/// One-off repair of rows written before titles were trimmed and dates were
/// checked against the calendar. `date()` normalises impossible days, so only
/// real `YYYY-MM-DD` values survive the comparison.
const REPAIR_LEGACY_ROWS_SQL: &str = "
    UPDATE tasks SET notes = '' WHERE notes IS NULL;
    UPDATE tasks SET commit_by = NULL
        WHERE commit_by IS NOT NULL AND date(commit_by) IS NOT commit_by;
    UPDATE tasks SET title = 'Untitled' WHERE trim(title, ' ' || char(9, 10, 13)) = '';
";

/// Stand-in title for stored rows whose title is blank.
const UNTITLED_TASK: &str = "Untitled";

/// Applies connection pragmas and the idempotent schema on checkout.
#[derive(Debug, Clone, Copy)]
struct SchemaInitializer;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SchemaInitializer {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(CONNECTION_PRAGMAS_SQL)
            .and_then(|()| connection.batch_execute(CREATE_SCHEMA_SQL))
            .and_then(|()| upgrade_legacy_table(connection))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

fn upgrade_legacy_table(connection: &mut SqliteConnection) -> QueryResult<()> {
    let present =
        diesel::sql_query(LABEL_COLUMN_COUNT_SQL).get_result::<LabelColumnCount>(connection)?;
    if present.count > 0 {
        return Ok(());
    }
    tracing::info!("upgrading legacy tasks table: adding label_color, repairing rows");
    match connection.batch_execute(ADD_LABEL_COLUMN_SQL) {
        // Another pooled connection may have added it first.
        Err(diesel::result::Error::DatabaseError(_, info))
            if info.message().contains("duplicate column name") => {}
        other => other?,
    }
    connection.batch_execute(REPAIR_LEGACY_ROWS_SQL)
}

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: TaskSqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a new repository from an existing connection pool.
    ///
    /// The pool is expected to apply the task schema itself; prefer
    /// [`SqliteTaskRepository::open`] unless the caller manages migrations.
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `database_url` and ensures
    /// the task schema exists.
    ///
    /// [`IN_MEMORY_DATABASE`] yields a private database held by a single
    /// long-lived connection, since every `SQLite` in-memory connection owns a
    /// distinct database.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the pool cannot
    /// establish its initial connection or the schema cannot be applied.
    pub fn open(database_url: &str) -> TaskRepositoryResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let mut builder = Pool::builder().connection_customizer(Box::new(SchemaInitializer));
        if database_url == IN_MEMORY_DATABASE {
            builder = builder
                .max_size(1)
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = builder
            .build(manager)
            .map_err(TaskRepositoryError::persistence)?;
        tracing::debug!(database = database_url, "opened task database");
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn insert(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(draft);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list(
        &self,
        filter: StatusFilter,
        order: CreationOrder,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = load_listing(connection, filter, order)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

/// Loads filtered rows in listing order; mirrors
/// [`listing_order`](crate::task::domain::listing_order).
fn load_listing(
    connection: &mut SqliteConnection,
    filter: StatusFilter,
    order: CreationOrder,
) -> QueryResult<Vec<TaskRow>> {
    let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
    if let Some(completed) = filter.completed() {
        query = query.filter(tasks::completed.eq(completed));
    }

    let by_due_date = query
        .order_by(tasks::completed.asc())
        .then_order_by(tasks::commit_by.is_null().asc())
        .then_order_by(tasks::commit_by.asc());

    match order {
        CreationOrder::OldestFirst => by_due_date
            .then_order_by(tasks::created_at.asc())
            .then_order_by(tasks::id.asc())
            .load::<TaskRow>(connection),
        CreationOrder::NewestFirst => by_due_date
            .then_order_by(tasks::created_at.desc())
            .then_order_by(tasks::id.desc())
            .load::<TaskRow>(connection),
    }
}

fn to_new_row(draft: &TaskDraft) -> NewTaskRow {
    let created_at = timestamp::format(draft.created_at());
    NewTaskRow {
        title: draft.title().as_str().to_owned(),
        notes: draft.notes().to_owned(),
        commit_by: draft.commit_by().map(|date| date.to_string()),
        updated_at: created_at.clone(),
        created_at,
        completed: false,
        label_color: draft.label_color().map(|color| color.as_str().to_owned()),
    }
}

fn to_changeset(task: &Task) -> TaskChangesetRow {
    TaskChangesetRow {
        title: task.title().as_str().to_owned(),
        notes: task.notes().to_owned(),
        commit_by: task.commit_by().map(|date| date.to_string()),
        updated_at: timestamp::format(task.updated_at()),
        completed: task.is_completed(),
        label_color: task.label_color().map(|color| color.as_str().to_owned()),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        notes,
        commit_by: persisted_commit_by,
        created_at: persisted_created_at,
        updated_at: persisted_updated_at,
        completed,
        label_color: persisted_label_color,
    } = row;

    let title = decode_title(id, &persisted_title)?;
    let commit_by = decode_commit_by(id, persisted_commit_by.as_deref());
    let created_at =
        timestamp::parse(&persisted_created_at).map_err(TaskRepositoryError::persistence)?;
    let updated_at =
        timestamp::parse(&persisted_updated_at).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        title,
        notes,
        commit_by,
        completed,
        label_color: LabelColor::sanitize(persisted_label_color.as_deref()),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

/// Rows written by earlier servers may hold a blank title; serve them under a
/// placeholder rather than failing the whole read.
fn decode_title(id: i64, persisted: &str) -> TaskRepositoryResult<TaskTitle> {
    TaskTitle::new(persisted).or_else(|err| {
        tracing::warn!(task_id = id, error = %err, "stored title is blank; using placeholder");
        TaskTitle::new(UNTITLED_TASK).map_err(TaskRepositoryError::persistence)
    })
}

/// Unreadable stored dates read back as no date.
fn decode_commit_by(id: i64, persisted: Option<&str>) -> Option<CommitBy> {
    CommitBy::parse_optional(persisted).unwrap_or_else(|err| {
        tracing::warn!(task_id = id, error = %err, "ignoring unreadable stored commit_by");
        None
    })
}
