use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod admin;
mod error;
mod models;
mod password;
mod rate_limiter;
mod repositories;
mod routes;
mod state;
mod validation;

use common::{
    cookies::CookieSettings,
    database::{DatabaseConfig, health_check, init_pool},
    identity::{AdminVerifier, UserVerifier},
    token::{TokenCodec, TokenConfig},
};

use crate::{
    admin::AdminAccount,
    rate_limiter::{RateLimiter, RateLimiterConfig},
    repositories::UserRepository,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting authentication service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let token_config = TokenConfig::from_env()?;
    let codec = TokenCodec::new(&token_config);
    let admin = AdminAccount::from_env()?;
    let cookies = CookieSettings::from_env();
    if !cookies.secure {
        info!("Session cookies are not marked Secure outside production");
    }

    let app_state = AppState {
        users: Arc::new(UserRepository::new(pool)),
        admin,
        user_verifier: UserVerifier::new(codec.clone()),
        admin_verifier: AdminVerifier::new(codec.clone()),
        codec,
        cookies,
        rate_limiter: RateLimiter::new(RateLimiterConfig::from_env()),
    };

    info!("Authentication service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr =
        std::env::var("AUTH_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Authentication service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
