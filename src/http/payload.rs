//! JSON request and response bodies for the task API.
//!
//! Request bodies reject unknown fields and mistyped values before any
//! domain value is built.

use serde::{Deserialize, Deserializer, Serialize};

use crate::task::{
    domain::{Task, timestamp},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTaskBody {
    /// Required title.
    pub title: String,
    /// Optional notes; `null` means empty.
    pub notes: Option<String>,
    /// Optional `YYYY-MM-DD` date.
    pub commit_by: Option<String>,
    /// Optional palette colour; unknown names are dropped.
    pub label_color: Option<String>,
}

impl From<CreateTaskBody> for CreateTaskRequest {
    fn from(body: CreateTaskBody) -> Self {
        let mut request = Self::new(body.title);
        if let Some(notes) = body.notes {
            request = request.with_notes(notes);
        }
        if let Some(commit_by) = body.commit_by {
            request = request.with_commit_by(commit_by);
        }
        if let Some(label_color) = body.label_color {
            request = request.with_label_color(label_color);
        }
        request
    }
}

/// Body of `PUT /api/tasks/{id}`.
///
/// Absent fields keep their stored value; an explicit `null` is kept distinct
/// so `commit_by` and `label_color` can be cleared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTaskBody {
    /// New title; `null` is treated as blank and rejected.
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    /// New notes; `null` empties them.
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    /// New commit-by date; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub commit_by: Option<Option<String>>,
    /// New completion flag: `true`/`false` or `1`/`0`.
    #[serde(default, deserialize_with = "completed_flag")]
    pub completed: Option<bool>,
    /// New label colour; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub label_color: Option<Option<String>>,
}

impl From<UpdateTaskBody> for UpdateTaskRequest {
    fn from(body: UpdateTaskBody) -> Self {
        let mut request = Self::new();
        if let Some(title) = body.title {
            request = request.with_title(title.unwrap_or_default());
        }
        if let Some(notes) = body.notes {
            request = request.with_notes(notes.unwrap_or_default());
        }
        if let Some(commit_by) = body.commit_by {
            request = request.with_commit_by(commit_by);
        }
        if let Some(completed) = body.completed {
            request = request.with_completed(completed);
        }
        if let Some(label_color) = body.label_color {
            request = request.with_label_color(label_color);
        }
        request
    }
}

/// Deserialises a present field (including `null`) as `Some(..)`; combined
/// with `#[serde(default)]` an absent field stays `None`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CompletedFlag {
    Flag(bool),
    Number(u8),
}

fn completed_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<CompletedFlag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(CompletedFlag::Flag(flag)) => Ok(Some(flag)),
        Some(CompletedFlag::Number(0)) => Ok(Some(false)),
        Some(CompletedFlag::Number(1)) => Ok(Some(true)),
        Some(CompletedFlag::Number(other)) => Err(serde::de::Error::custom(format!(
            "completed must be a boolean or 0/1, got {other}"
        ))),
    }
}

/// Query string of `GET /api/tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksQuery {
    /// `all`, `active`, or `completed`.
    pub status: Option<String>,
}

/// Wire representation of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskBody {
    /// Task identifier.
    pub id: i64,
    /// Trimmed title.
    pub title: String,
    /// Notes, possibly empty.
    pub notes: String,
    /// `YYYY-MM-DD` or `null`.
    pub commit_by: Option<String>,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    /// ISO-8601 last update timestamp.
    pub updated_at: String,
    /// `1` when completed, `0` otherwise.
    pub completed: u8,
    /// Palette colour name or `null`.
    pub label_color: Option<&'static str>,
}

impl From<&Task> for TaskBody {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title().as_str().to_owned(),
            notes: task.notes().to_owned(),
            commit_by: task.commit_by().map(|date| date.to_string()),
            created_at: timestamp::format(task.created_at()),
            updated_at: timestamp::format(task.updated_at()),
            completed: u8::from(task.is_completed()),
            label_color: task.label_color().map(|color| color.as_str()),
        }
    }
}

/// `{ "ok": true }` acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OkBody {
    /// Always `true`.
    pub ok: bool,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthBody {
    /// Always `true`.
    pub ok: bool,
    /// Server time when the check was answered.
    pub time: String,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}
