//! Request handlers for the task API.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use mockable::Clock;

use super::{
    error::ApiError,
    payload::{CreateTaskBody, HealthBody, ListTasksQuery, OkBody, TaskBody, UpdateTaskBody},
};
use crate::task::{
    domain::{StatusFilter, TaskId, timestamp},
    ports::TaskRepository,
    services::TaskLifecycleService,
};

/// Router state: the shared task service.
pub type SharedTaskService<R, C> = Arc<TaskLifecycleService<R, C>>;

/// `GET /api/health`
pub async fn health<R, C>(State(service): State<SharedTaskService<R, C>>) -> Json<HealthBody>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(HealthBody {
        ok: true,
        time: timestamp::format(service.now()),
    })
}

/// `GET /api/tasks?status=all|active|completed`
///
/// A missing or unreadable `status` lists every task.
pub async fn list_tasks<R, C>(
    State(service): State<SharedTaskService<R, C>>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskBody>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let status = query.ok().and_then(|Query(params)| params.status);
    let filter = StatusFilter::from_query(status.as_deref());
    let tasks = service.list(filter).await?;
    Ok(Json(tasks.iter().map(TaskBody::from).collect()))
}

/// `GET /api/tasks/{id}`
pub async fn get_task<R, C>(
    State(service): State<SharedTaskService<R, C>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaskBody>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service.get(parse_task_id(id)?).await?;
    Ok(Json(TaskBody::from(&task)))
}

/// `POST /api/tasks`
pub async fn create_task<R, C>(
    State(service): State<SharedTaskService<R, C>>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskBody>), ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = body.map_err(|rejection| bad_request(&rejection))?;
    let task = service.create(request.into()).await?;
    tracing::info!(task_id = %task.id(), "created task");
    Ok((StatusCode::CREATED, Json(TaskBody::from(&task))))
}

/// `PUT /api/tasks/{id}`
pub async fn update_task<R, C>(
    State(service): State<SharedTaskService<R, C>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<TaskBody>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = parse_task_id(id)?;
    let Json(request) = body.map_err(|rejection| bad_request(&rejection))?;
    let task = service.update(task_id, request.into()).await?;
    Ok(Json(TaskBody::from(&task)))
}

/// `DELETE /api/tasks/{id}`
pub async fn delete_task<R, C>(
    State(service): State<SharedTaskService<R, C>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OkBody>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = parse_task_id(id)?;
    service.delete(task_id).await?;
    tracing::info!(task_id = %task_id, "deleted task");
    Ok(Json(OkBody { ok: true }))
}

/// Any unmatched `/api/...` path.
pub async fn api_not_found() -> ApiError {
    ApiError::NotFound
}

/// A known `/api` route called with a method it does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// A non-numeric id cannot name a task, so it reads as not-found.
fn parse_task_id(path: Result<Path<i64>, PathRejection>) -> Result<TaskId, ApiError> {
    path.map(|Path(raw)| TaskId::new(raw))
        .map_err(|_| ApiError::NotFound)
}

fn bad_request(rejection: &JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}
