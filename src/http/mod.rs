//! HTTP surface of the task tracker.
//!
//! Maps `/api` routes onto [`TaskLifecycleService`] calls and serves the
//! static frontend for every other path. Unknown `/api` paths answer with a
//! JSON 404; unknown frontend paths fall back to `index.html` so client-side
//! routes survive a reload. A known `/api` route called with the wrong method
//! answers with a JSON 405.

mod error;
pub mod handlers;
pub mod payload;

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{any, get},
};
use mockable::Clock;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub use error::ApiError;

use crate::task::{ports::TaskRepository, services::TaskLifecycleService};

/// Largest accepted JSON request body (1 MiB).
pub const JSON_BODY_LIMIT: usize = 1024 * 1024;

/// Builds the application router.
///
/// `static_dir` must contain the frontend's `index.html`; it is served for
/// any non-API path that does not match a file.
pub fn router<R, C>(service: Arc<TaskLifecycleService<R, C>>, static_dir: &Path) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route(
            "/api/health",
            get(handlers::health::<R, C>).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/tasks",
            get(handlers::list_tasks::<R, C>)
                .post(handlers::create_task::<R, C>)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/tasks/{id}",
            get(handlers::get_task::<R, C>)
                .put(handlers::update_task::<R, C>)
                .delete(handlers::delete_task::<R, C>)
                .fallback(handlers::method_not_allowed),
        )
        .route("/api", any(handlers::api_not_found))
        .route("/api/{*rest}", any(handlers::api_not_found))
        .fallback_service(frontend)
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
