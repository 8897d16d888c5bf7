//! Authentication service routes

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use common::{
    gate::gate,
    http::{get_only, post_only},
    identity::{
        ADMIN_COOKIE, AdminIdentity, AdminVerifier, USER_COOKIE, UserIdentity, UserVerifier,
    },
    token::{AdminClaims, Subject},
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    error::{AuthError, AuthResult},
    models::{AdminLoginCredentials, LoginCredentials},
    password::{UNKNOWN_USER_HASH, verify_password},
    state::AppState,
    validation::{validate_email, validate_required},
};

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/api/auth/verify", get_only(verify_user))
        .route_layer(middleware::from_fn_with_state(
            state.user_verifier.clone(),
            gate::<UserVerifier>,
        ));

    let admin_routes = Router::new()
        .route("/api/admin/verify", get_only(verify_admin))
        .route_layer(middleware::from_fn_with_state(
            state.admin_verifier.clone(),
            gate::<AdminVerifier>,
        ));

    Router::new()
        .route("/health", get_only(health_check))
        .route("/api/auth/login", post_only(login))
        .route("/api/auth/logout", post_only(logout))
        .route("/api/admin/login", post_only(admin_login))
        .route("/api/admin/logout", post_only(admin_logout))
        .merge(user_routes)
        .merge(admin_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginCredentials>, JsonRejection>,
) -> AuthResult<impl IntoResponse> {
    let Json(payload) =
        payload.map_err(|_| AuthError::Validation("Email et mot de passe requis".to_string()))?;

    let email = payload.email.trim().to_lowercase();
    validate_email(&email).map_err(AuthError::Validation)?;
    validate_required(&payload.password, "Le mot de passe est requis")
        .map_err(AuthError::Validation)?;

    info!("Login attempt for user: {}", email);

    let throttle_key = format!("user:{email}");
    if !state.rate_limiter.is_allowed(&throttle_key).await {
        warn!("Login throttled for user: {}", email);
        return Err(AuthError::TooManyAttempts);
    }

    let user = state.users.find_by_email(&email).await.map_err(|e| {
        error!("Failed to look up user {}: {:?}", email, e);
        AuthError::internal("Erreur lors de la connexion", e)
    })?;

    let password_hash = user
        .as_ref()
        .map_or(UNKNOWN_USER_HASH, |user| user.password_hash.as_str());
    let password_ok = verify_password(password_hash, &payload.password);

    let user = match user {
        Some(user) if password_ok => user,
        _ => {
            info!("Rejected credentials for user: {}", email);
            return Err(AuthError::InvalidCredentials);
        }
    };

    let token = state
        .codec
        .sign(Subject::User(user.claims()))
        .map_err(|e| {
            error!("Failed to generate session token: {}", e);
            AuthError::internal("Erreur lors de la connexion", e)
        })?;

    state.rate_limiter.reset(&throttle_key).await;

    let identity = UserIdentity {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
    };

    Ok((
        jar.add(state.cookies.session(USER_COOKIE, token)),
        Json(json!({
            "success": true,
            "user": identity,
        })),
    ))
}

/// User logout endpoint
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(state.cookies.cleared(USER_COOKIE)),
        Json(json!({
            "success": true,
            "message": "Déconnexion réussie"
        })),
    )
}

/// Current user, resolved by the gate
pub async fn verify_user(Extension(user): Extension<UserIdentity>) -> impl IntoResponse {
    Json(json!({ "user": user }))
}

/// Admin login endpoint
pub async fn admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<AdminLoginCredentials>, JsonRejection>,
) -> AuthResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|_| {
        AuthError::Validation("Identifiant et mot de passe requis".to_string())
    })?;

    let username = payload.username.trim();
    validate_required(username, "L'identifiant est requis").map_err(AuthError::Validation)?;
    validate_required(&payload.password, "Le mot de passe est requis")
        .map_err(AuthError::Validation)?;

    info!("Admin login attempt: {}", username);

    let throttle_key = format!("admin:{username}");
    if !state.rate_limiter.is_allowed(&throttle_key).await {
        warn!("Admin login throttled: {}", username);
        return Err(AuthError::TooManyAttempts);
    }

    if !state.admin.authenticate(username, &payload.password) {
        info!("Rejected admin credentials: {}", username);
        return Err(AuthError::InvalidCredentials);
    }

    let token = state
        .codec
        .sign(Subject::Admin(AdminClaims {
            username: username.to_string(),
        }))
        .map_err(|e| {
            error!("Failed to generate admin session token: {}", e);
            AuthError::internal("Erreur lors de la connexion", e)
        })?;

    state.rate_limiter.reset(&throttle_key).await;

    Ok((
        jar.add(state.cookies.session(ADMIN_COOKIE, token)),
        Json(json!({ "success": true })),
    ))
}

/// Admin logout endpoint
pub async fn admin_logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(state.cookies.cleared(ADMIN_COOKIE)),
        Json(json!({
            "success": true,
            "message": "Déconnexion réussie"
        })),
    )
}

/// Current admin, resolved by the gate
pub async fn verify_admin(Extension(admin): Extension<AdminIdentity>) -> impl IntoResponse {
    Json(json!({ "admin": admin }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        admin::AdminAccount,
        models::User,
        password::tests::hash,
        rate_limiter::{RateLimiter, RateLimiterConfig},
        repositories::user::memory::InMemoryUserStore,
    };
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use common::{
        cookies::CookieSettings,
        token::{TokenCodec, TokenConfig},
    };
    use serde_json::Value;
    use std::sync::{Arc, atomic::Ordering};
    use tower::ServiceExt;

    fn state(users: InMemoryUserStore) -> AppState {
        let codec = TokenCodec::new(&TokenConfig {
            secret: "fixture-secret".to_string(),
            expiry: 3600,
        });

        AppState {
            users: Arc::new(users),
            admin: AdminAccount {
                username: "gerant".to_string(),
                password_hash: hash("Admin-Pass-1"),
            },
            user_verifier: UserVerifier::new(codec.clone()),
            admin_verifier: AdminVerifier::new(codec.clone()),
            codec,
            cookies: CookieSettings { secure: true },
            rate_limiter: RateLimiter::new(RateLimiterConfig {
                max_attempts: 3,
                window_seconds: 300,
                ban_duration_seconds: 900,
            }),
        }
    }

    fn users() -> InMemoryUserStore {
        InMemoryUserStore {
            users: vec![User {
                id: 12,
                first_name: "Jeanne".to_string(),
                last_name: "Martin".to_string(),
                email: "jeanne.martin@example.com".to_string(),
                password_hash: hash("Secret-Pass-1"),
            }],
            ..Default::default()
        }
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn set_cookie(response: &Response) -> String {
        response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .to_string()
    }

    async fn json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_login_sets_cookie_accepted_by_verify() {
        let app = create_router(state(users()));

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                r#"{"email": "Jeanne.Martin@example.com", "password": "Secret-Pass-1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("authToken="), "{cookie}");
        assert!(cookie.contains("HttpOnly"), "{cookie}");
        assert!(cookie.contains("Secure"), "{cookie}");
        assert!(cookie.contains("SameSite=Strict"), "{cookie}");

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["id"], 12);
        assert_eq!(json["user"]["firstName"], "Jeanne");

        let session = cookie.split(';').next().unwrap();
        let response = app
            .oneshot(get_with_cookie("/api/auth/verify", Some(session)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["user"]["email"], "jeanne.martin@example.com");
        assert_eq!(json["user"]["lastName"], "Martin");
    }

    #[tokio::test]
    async fn test_verify_without_cookie_is_unauthorized() {
        let app = create_router(state(users()));

        for uri in ["/api/auth/verify", "/api/admin/verify"] {
            let response = app.clone().oneshot(get_with_cookie(uri, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }

        let response = app
            .oneshot(get_with_cookie("/api/auth/verify", Some("authToken=forged")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let app = create_router(state(users()));

        for body in [
            r#"{"email": "jeanne.martin@example.com", "password": "wrong"}"#,
            r#"{"email": "nobody@example.com", "password": "Secret-Pass-1"}"#,
        ] {
            let response = app
                .clone()
                .oneshot(post_json("/api/auth/login", body))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{body}");
            assert!(response.headers().get(header::SET_COOKIE).is_none());
            assert_eq!(json_body(response).await["message"], "Identifiants incorrects");
        }
    }

    #[tokio::test]
    async fn test_login_validates_input() {
        let app = create_router(state(users()));

        for body in [
            r#"{"email": "not-an-email", "password": "x"}"#,
            r#"{"email": "jeanne.martin@example.com", "password": ""}"#,
            r#"{"email": "jeanne.martin@example.com"}"#,
        ] {
            let response = app
                .clone()
                .oneshot(post_json("/api/auth/login", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        }
    }

    #[tokio::test]
    async fn test_login_is_throttled() {
        let app = create_router(state(users()));
        let body = r#"{"email": "jeanne.martin@example.com", "password": "wrong"}"#;

        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(post_json("/api/auth/login", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let response = app
            .oneshot(post_json(
                "/api/auth/login",
                r#"{"email": "jeanne.martin@example.com", "password": "Secret-Pass-1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_login_storage_failure_is_server_error() {
        let users = users();
        users.failing.store(true, Ordering::SeqCst);
        let response = create_router(state(users))
            .oneshot(post_json(
                "/api/auth/login",
                r#"{"email": "jeanne.martin@example.com", "password": "Secret-Pass-1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Erreur lors de la connexion");
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let response = create_router(state(users()))
            .oneshot(post_json("/api/auth/logout", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("authToken=;"), "{cookie}");
        assert!(cookie.contains("Max-Age=0"), "{cookie}");
    }

    #[tokio::test]
    async fn test_admin_login_and_verify() {
        let app = create_router(state(users()));

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/admin/login",
                r#"{"username": "gerant", "password": "Admin-Pass-1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("adminAuthToken="), "{cookie}");
        let session = cookie.split(';').next().unwrap();

        let response = app
            .clone()
            .oneshot(get_with_cookie("/api/admin/verify", Some(session)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["admin"]["connected"], true);

        // An admin session is not a user session
        let user_cookie = session.replacen("adminAuthToken", "authToken", 1);
        let response = app
            .oneshot(get_with_cookie("/api/auth/verify", Some(&user_cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_login_rejects_bad_password() {
        let response = create_router(state(users()))
            .oneshot(post_json(
                "/api/admin/login",
                r#"{"username": "gerant", "password": "guess"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_get() {
        let response = create_router(state(users()))
            .oneshot(get_with_cookie("/api/auth/login", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST");
    }
}
