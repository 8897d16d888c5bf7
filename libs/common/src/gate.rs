//! Request gate for protected routes

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::identity::IdentityVerifier;

/// Rejection for requests without a valid identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unauthenticated;

impl IntoResponse for Unauthenticated {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Non authentifié" })),
        )
            .into_response()
    }
}

/// Resolve the identity for a request or reject it
pub fn require<V: IdentityVerifier>(
    verifier: &V,
    headers: &HeaderMap,
) -> Result<V::Identity, Unauthenticated> {
    verifier.verify(headers).ok_or(Unauthenticated)
}

/// Middleware that only lets identified requests through.
///
/// The identity is inserted into the request extensions, handlers pick it up
/// with `Extension<V::Identity>`.
///
/// ```rust,ignore
/// Router::new()
///     .route("/private", get(handler))
///     .route_layer(middleware::from_fn_with_state(verifier, gate::<AdminVerifier>))
/// ```
pub async fn gate<V: IdentityVerifier>(
    State(verifier): State<V>,
    mut req: Request,
    next: Next,
) -> Result<Response, Unauthenticated> {
    let identity = require(&verifier, req.headers())?;
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
