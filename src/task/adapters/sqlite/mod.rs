//! `SQLite` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{IN_MEMORY_DATABASE, SqliteTaskRepository, TaskSqlitePool};
