//! Custom error types for the booking service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::lifecycle::ReservationError;

/// Custom error type for the booking service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage failure, `detail` is the underlying error
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl From<ReservationError> for ApiError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::MissingParameter(msg) | ReservationError::InvalidParameter(msg) => {
                ApiError::BadRequest(msg.to_string())
            }
            ReservationError::NotFound(msg) => ApiError::NotFound(msg.to_string()),
            ReservationError::Storage { context, source } => {
                error!("{}: {:?}", context, source);
                ApiError::Internal {
                    message: context.to_string(),
                    detail: source.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            ApiError::Internal { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": message, "error": detail }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
