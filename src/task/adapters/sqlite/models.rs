//! Diesel row models for task persistence.

use super::schema::tasks;
use diesel::prelude::*;

/// Number of `label_color` columns on the `tasks` table (zero or one).
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct LabelColumnCount {
    /// Matching column count.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub count: i64,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Title text.
    pub title: String,
    /// Notes text.
    pub notes: String,
    /// Commit-by date text.
    pub commit_by: Option<String>,
    /// Creation timestamp text.
    pub created_at: String,
    /// Last update timestamp text.
    pub updated_at: String,
    /// Completion flag.
    pub completed: bool,
    /// Label colour name.
    pub label_color: Option<String>,
}

/// Insert model for task records; the identifier is assigned by `SQLite`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Title text.
    pub title: String,
    /// Notes text.
    pub notes: String,
    /// Commit-by date text.
    pub commit_by: Option<String>,
    /// Creation timestamp text.
    pub created_at: String,
    /// Initial update timestamp text.
    pub updated_at: String,
    /// Completion flag.
    pub completed: bool,
    /// Label colour name.
    pub label_color: Option<String>,
}

/// Full-row changeset written on update.
///
/// `None` writes `NULL` so cleared dates and labels are persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangesetRow {
    /// Title text.
    pub title: String,
    /// Notes text.
    pub notes: String,
    /// Commit-by date text.
    pub commit_by: Option<String>,
    /// Last update timestamp text.
    pub updated_at: String,
    /// Completion flag.
    pub completed: bool,
    /// Label colour name.
    pub label_color: Option<String>,
}
