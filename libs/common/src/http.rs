//! Single-method routing
//!
//! Every endpoint accepts exactly one HTTP method. Anything else is answered
//! with 405 and an `Allow` header naming the accepted method.

use axum::{
    Json,
    handler::Handler,
    http::{Method, StatusCode, header::ALLOW},
    response::{IntoResponse, Response},
    routing::{MethodFilter, MethodRouter, on},
};
use serde_json::json;

/// Rejection for a method the endpoint does not accept
#[derive(Debug, Clone)]
pub struct MethodNotAllowed {
    pub allowed: Method,
    pub received: Method,
}

impl IntoResponse for MethodNotAllowed {
    fn into_response(self) -> Response {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            [(ALLOW, self.allowed.as_str().to_string())],
            Json(json!({
                "message": format!("Méthode {} non autorisée", self.received),
            })),
        )
            .into_response()
    }
}

/// Route that only answers `GET`. `HEAD` is rejected like any other method.
pub fn get_only<H, T, S>(handler: H) -> MethodRouter<S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    on(MethodFilter::GET, handler).fallback(|method: Method| async move {
        MethodNotAllowed {
            allowed: Method::GET,
            received: method,
        }
    })
}

/// Route that only answers `POST`
pub fn post_only<H, T, S>(handler: H) -> MethodRouter<S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    on(MethodFilter::POST, handler).fallback(|method: Method| async move {
        MethodNotAllowed {
            allowed: Method::POST,
            received: method,
        }
    })
}
