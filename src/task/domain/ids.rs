//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier for a task record.
///
/// Identifiers are allocated by the repository on insert and are never reused
/// after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task title, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is empty or
    /// consists only of whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target calendar date by which a task should be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CommitBy(NaiveDate);

impl CommitBy {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Parses a strict `YYYY-MM-DD` calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCommitBy`] when the value does not
    /// have the exact shape `YYYY-MM-DD` or does not name a real date.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        if !has_iso_date_shape(value) {
            return Err(TaskDomainError::InvalidCommitBy(value.to_owned()));
        }
        NaiveDate::parse_from_str(value, Self::FORMAT)
            .map(Self)
            .map_err(|_| TaskDomainError::InvalidCommitBy(value.to_owned()))
    }

    /// Parses an optional commit-by value supplied by a client.
    ///
    /// An empty string is treated the same as `None`, matching date inputs
    /// that submit `""` once cleared.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCommitBy`] for non-empty values that
    /// fail [`CommitBy::parse`].
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, TaskDomainError> {
        match value {
            None | Some("") => Ok(None),
            Some(raw) => Self::parse(raw).map(Some),
        }
    }

    /// Wraps an already-validated date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CommitBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// Checks the `DDDD-DD-DD` byte layout before handing off to `chrono`, which
/// would otherwise accept unpadded or signed fields.
fn has_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(position, byte)| match position {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}
