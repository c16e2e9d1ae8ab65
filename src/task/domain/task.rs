//! Task aggregate root and the value objects used to create and change it.

use super::{CommitBy, LabelColor, TaskId, TaskTitle, timestamp};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Validated input for a task that has not been stored yet.
///
/// The repository turns a draft into a [`Task`] by assigning its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: TaskTitle,
    notes: String,
    commit_by: Option<CommitBy>,
    label_color: Option<LabelColor>,
    created_at: DateTime<Utc>,
}

impl TaskDraft {
    /// Creates a draft with the given title and default optional fields,
    /// stamped with the current clock time.
    #[must_use]
    pub fn new(title: TaskTitle, clock: &impl Clock) -> Self {
        Self {
            title,
            notes: String::new(),
            commit_by: None,
            label_color: None,
            created_at: timestamp::now(clock),
        }
    }

    /// Sets free-form notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Sets the commit-by date.
    #[must_use]
    pub fn with_commit_by(mut self, commit_by: Option<CommitBy>) -> Self {
        self.commit_by = commit_by;
        self
    }

    /// Sets the label colour.
    #[must_use]
    pub fn with_label_color(mut self, label_color: Option<LabelColor>) -> Self {
        self.label_color = label_color;
        self
    }

    /// Returns the draft title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the draft notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns the draft commit-by date.
    #[must_use]
    pub const fn commit_by(&self) -> Option<CommitBy> {
        self.commit_by
    }

    /// Returns the draft label colour.
    #[must_use]
    pub const fn label_color(&self) -> Option<LabelColor> {
        self.label_color
    }

    /// Returns the instant the draft was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Materialises the draft as a stored task with the assigned identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            notes: self.notes,
            commit_by: self.commit_by,
            completed: false,
            label_color: self.label_color,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Partial set of field changes applied by an update.
///
/// `None` leaves a field untouched. For the nullable fields the inner
/// `Option` is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<TaskTitle>,
    notes: Option<String>,
    commit_by: Option<Option<CommitBy>>,
    completed: Option<bool>,
    label_color: Option<Option<LabelColor>>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Replaces or clears the commit-by date.
    #[must_use]
    pub fn with_commit_by(mut self, commit_by: Option<CommitBy>) -> Self {
        self.commit_by = Some(commit_by);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Replaces or clears the label colour.
    #[must_use]
    pub fn with_label_color(mut self, label_color: Option<LabelColor>) -> Self {
        self.label_color = Some(label_color);
        self
    }
}

/// Task aggregate root.
///
/// Only built through [`TaskDraft::into_task`] or [`Task::from_persisted`],
/// so it serialises but does not deserialise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    notes: String,
    commit_by: Option<CommitBy>,
    completed: bool,
    label_color: Option<LabelColor>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted notes.
    pub notes: String,
    /// Persisted commit-by date, if any.
    pub commit_by: Option<CommitBy>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted label colour, if any.
    pub label_color: Option<LabelColor>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            notes: data.notes,
            commit_by: data.commit_by,
            completed: data.completed,
            label_color: data.label_color,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns the commit-by date, if any.
    #[must_use]
    pub const fn commit_by(&self) -> Option<CommitBy> {
        self.commit_by
    }

    /// Returns whether the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the label colour, if any.
    #[must_use]
    pub const fn label_color(&self) -> Option<LabelColor> {
        self.label_color
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial change set and refreshes `updated_at`.
    ///
    /// The timestamp is refreshed even when the change set is empty.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) {
        let TaskChanges {
            title,
            notes,
            commit_by,
            completed,
            label_color,
        } = changes;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_notes) = notes {
            self.notes = new_notes;
        }
        if let Some(new_commit_by) = commit_by {
            self.commit_by = new_commit_by;
        }
        if let Some(new_completed) = completed {
            self.completed = new_completed;
        }
        if let Some(new_label_color) = label_color {
            self.label_color = new_label_color;
        }
        self.touch(clock);
    }

    /// Moves `updated_at` to the current clock time, never backwards.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = timestamp::now(clock).max(self.updated_at);
    }
}
