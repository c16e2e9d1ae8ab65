//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
///
/// Every variant is client-fixable: the caller supplied input that the task
/// model cannot represent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is missing or empty after trimming.
    #[error("title is required and must not be blank")]
    EmptyTitle,

    /// The commit-by value is not a calendar date in `YYYY-MM-DD` form.
    #[error("commit_by must be YYYY-MM-DD or null, got '{0}'")]
    InvalidCommitBy(String),
}

/// Error returned while parsing persisted timestamps.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid timestamp: {0}")]
pub struct ParseTimestampError(pub String);
