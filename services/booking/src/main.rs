use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod lifecycle;
mod models;
mod repositories;
mod routes;
mod state;

use common::{
    database::{DatabaseConfig, health_check, init_pool},
    identity::AdminVerifier,
    token::{TokenCodec, TokenConfig},
};

use crate::{
    lifecycle::ReservationLifecycle, repositories::reservation::ReservationRepository,
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

    info!("Starting booking service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Admin sessions are issued by the auth service with the same secret
    let token_config = TokenConfig::from_env()?;
    let admin_verifier = AdminVerifier::new(TokenCodec::new(&token_config));

    let repository = ReservationRepository::new(pool);
    let app_state = AppState {
        reservations: ReservationLifecycle::new(Arc::new(repository)),
        admin_verifier,
    };

    info!("Booking service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr =
        std::env::var("BOOKING_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Booking service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
