//! HTTP surface: router, handlers, and error responses.

pub mod routes;
pub mod tasks;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::db::StoreError;

/// Error surfaced to HTTP clients.
///
/// Not-found is the router-level translation of the service's absent-result
/// signal; it never originates as an exception inside the service.
#[derive(Debug)]
pub enum ApiError {
    /// The requested task id does not exist.
    NotFound,
    /// The request was well-formed JSON but failed validation.
    Invalid(String),
    /// The storage layer failed; details are logged, not exposed.
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Task not found".to_string()),
            Self::Invalid(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            Self::Store(err) => {
                tracing::error!("Storage failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal storage error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
