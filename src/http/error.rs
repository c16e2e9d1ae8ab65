//! HTTP error mapping for the task API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::payload::ErrorBody;
use crate::task::{ports::TaskRepositoryError, services::TaskLifecycleError};

/// Errors produced while answering an API request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be decoded into the expected shape.
    #[error("{0}")]
    BadRequest(String),

    /// The path does not name an existing resource.
    #[error("Not found")]
    NotFound,

    /// The route exists but does not accept the request method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The task store rejected or failed the operation.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
}

impl ApiError {
    /// Returns the HTTP status the error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Lifecycle(TaskLifecycleError::Domain(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound
            | Self::Lifecycle(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Lifecycle(TaskLifecycleError::Repository(TaskRepositoryError::Persistence(
                _,
            ))) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Lifecycle(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(_))) => {
                "Not found".to_owned()
            }
            Self::Lifecycle(TaskLifecycleError::Repository(TaskRepositoryError::Persistence(
                _,
            ))) => "Internal storage error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "task store failure");
        }
        let body = ErrorBody {
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
