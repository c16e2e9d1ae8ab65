//! Status filtering and presentation order for task listings.

use super::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Three-way view selector applied to task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks that are not completed.
    Active,
    /// Tasks that are completed.
    Completed,
}

impl StatusFilter {
    /// Interprets a `status` query value.
    ///
    /// Missing or unrecognised values select [`StatusFilter::All`].
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("active") => Self::Active,
            Some("completed") => Self::Completed,
            _ => Self::All,
        }
    }

    /// Returns the completion flag the filter requires, if any.
    #[must_use]
    pub const fn completed(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(false),
            Self::Completed => Some(true),
        }
    }

    /// Returns whether the task passes the filter.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        self.completed()
            .is_none_or(|completed| task.is_completed() == completed)
    }

    /// Returns the canonical query representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the creation-time tie-break between otherwise equal tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreationOrder {
    /// Earlier-created tasks first.
    #[default]
    OldestFirst,
    /// Later-created tasks first.
    NewestFirst,
}

impl CreationOrder {
    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::OldestFirst => ordering,
            Self::NewestFirst => ordering.reverse(),
        }
    }
}

/// Compares two tasks by listing precedence.
///
/// Precedence, highest first:
///
/// 1. incomplete before completed;
/// 2. tasks with a commit-by date before undated tasks;
/// 3. earlier commit-by date first;
/// 4. creation time, in the direction given by `order`;
/// 5. identifier, in the same direction, so the order is total.
#[must_use]
pub fn listing_order(left: &Task, right: &Task, order: CreationOrder) -> Ordering {
    left.is_completed()
        .cmp(&right.is_completed())
        .then_with(|| compare_commit_by(left, right))
        .then_with(|| order.orient(left.created_at().cmp(&right.created_at())))
        .then_with(|| order.orient(left.id().cmp(&right.id())))
}

fn compare_commit_by(left: &Task, right: &Task) -> Ordering {
    match (left.commit_by(), right.commit_by()) {
        (Some(left_date), Some(right_date)) => left_date.cmp(&right_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
