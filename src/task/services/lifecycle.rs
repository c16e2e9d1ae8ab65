//! Service layer implementing the task store operations.

use crate::task::{
    domain::{
        CommitBy, CreationOrder, LabelColor, StatusFilter, Task, TaskChanges, TaskDomainError,
        TaskDraft, TaskId, TaskTitle, timestamp,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Request payload for creating a task.
///
/// Values are raw client input; validation happens in
/// [`TaskLifecycleService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    notes: Option<String>,
    commit_by: Option<String>,
    label_color: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notes: None,
            commit_by: None,
            label_color: None,
        }
    }

    /// Sets task notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the commit-by date (`YYYY-MM-DD`).
    #[must_use]
    pub fn with_commit_by(mut self, commit_by: impl Into<String>) -> Self {
        self.commit_by = Some(commit_by.into());
        self
    }

    /// Sets the label colour name.
    #[must_use]
    pub fn with_label_color(mut self, label_color: impl Into<String>) -> Self {
        self.label_color = Some(label_color.into());
        self
    }

    fn into_draft(self, clock: &impl Clock) -> Result<TaskDraft, TaskDomainError> {
        let title = TaskTitle::new(&self.title)?;
        let commit_by = CommitBy::parse_optional(self.commit_by.as_deref())?;
        let label_color = LabelColor::sanitize(self.label_color.as_deref());
        Ok(TaskDraft::new(title, clock)
            .with_notes(self.notes.unwrap_or_default())
            .with_commit_by(commit_by)
            .with_label_color(label_color))
    }
}

/// Request payload for a partial task update.
///
/// Fields left unset keep their stored value. The nullable fields
/// distinguish "absent" (outer `None`) from "set to null" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    notes: Option<String>,
    commit_by: Option<Option<String>>,
    completed: Option<bool>,
    label_color: Option<Option<String>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update that only refreshes `updated_at`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Replaces (`Some`) or clears (`None`) the commit-by date.
    #[must_use]
    pub fn with_commit_by(mut self, commit_by: Option<String>) -> Self {
        self.commit_by = Some(commit_by);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Replaces (`Some`) or clears (`None`) the label colour.
    #[must_use]
    pub fn with_label_color(mut self, label_color: Option<String>) -> Self {
        self.label_color = Some(label_color);
        self
    }

    fn into_changes(self) -> Result<TaskChanges, TaskDomainError> {
        let mut changes = TaskChanges::new();
        if let Some(title) = self.title {
            changes = changes.with_title(TaskTitle::new(&title)?);
        }
        if let Some(notes) = self.notes {
            changes = changes.with_notes(notes);
        }
        if let Some(commit_by) = self.commit_by {
            changes = changes.with_commit_by(CommitBy::parse_optional(commit_by.as_deref())?);
        }
        if let Some(completed) = self.completed {
            changes = changes.with_completed(completed);
        }
        if let Some(label_color) = self.label_color {
            changes = changes.with_label_color(LabelColor::sanitize(label_color.as_deref()));
        }
        Ok(changes)
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Returns whether the error reports a missing task.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(TaskRepositoryError::NotFound(_)))
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task store service: validation, defaulting, and ordered listing on top of
/// a [`TaskRepository`].
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    creation_order: CreationOrder,
    write_gate: Arc<Mutex<()>>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            creation_order: self.creation_order,
            write_gate: Arc::clone(&self.write_gate),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service listing ties oldest-first.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            creation_order: CreationOrder::default(),
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Sets the direction of the creation-time tie-break used by
    /// [`TaskLifecycleService::list`].
    #[must_use]
    pub fn with_creation_order(mut self, creation_order: CreationOrder) -> Self {
        self.creation_order = creation_order;
        self
    }

    /// Returns the current time from the service clock, at stored precision.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        timestamp::now(&*self.clock)
    }

    /// Returns the configured creation-time tie-break direction.
    #[must_use]
    pub const fn creation_order(&self) -> CreationOrder {
        self.creation_order
    }

    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is blank or the
    /// commit-by date is malformed, and [`TaskLifecycleError::Repository`]
    /// when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let draft = request.into_draft(&*self.clock)?;
        let task = self.repository.insert(&draft).await?;
        tracing::debug!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when no task has
    /// the identifier.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(id).into())
    }

    /// Applies a partial update to an existing task.
    ///
    /// Existence is checked before the request is validated, so a missing
    /// task reports not-found even when the request is also invalid.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task does not exist, and
    /// [`TaskLifecycleError::Domain`] when a supplied title or commit-by
    /// value is invalid.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let _serialized = self.write_gate.lock().await;
        let mut task = self.get(id).await?;
        let changes = request.into_changes()?;
        task.apply(changes, &*self.clock);
        self.repository.update(&task).await?;
        tracing::debug!(task_id = %id, "task updated");
        Ok(task)
    }

    /// Permanently deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task does
    /// not exist.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let _serialized = self.write_gate.lock().await;
        self.repository.delete(id).await?;
        tracing::debug!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Lists tasks passing `filter` in presentation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list(&self, filter: StatusFilter) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(filter, self.creation_order).await?)
    }
}
