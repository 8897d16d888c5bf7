//! Custom error types for the authentication service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing or malformed login field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown login or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Login throttled by the rate limiter
    #[error("Too many login attempts")]
    TooManyAttempts,

    /// Storage or signing failure
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl AuthError {
    pub fn internal(message: &str, detail: impl std::fmt::Display) -> Self {
        AuthError::Internal {
            message: message.to_string(),
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AuthError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Identifiants incorrects" }),
            ),
            AuthError::TooManyAttempts => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "message": "Trop de tentatives, réessayez plus tard" }),
            ),
            AuthError::Internal { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": message, "error": detail }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for authentication results
pub type AuthResult<T> = Result<T, AuthError>;
