//! Application state shared across handlers

use common::{
    cookies::CookieSettings,
    identity::{AdminVerifier, UserVerifier},
    token::TokenCodec,
};
use std::sync::Arc;

use crate::{admin::AdminAccount, rate_limiter::RateLimiter, repositories::UserStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub admin: AdminAccount,
    pub codec: TokenCodec,
    pub user_verifier: UserVerifier,
    pub admin_verifier: AdminVerifier,
    pub cookies: CookieSettings,
    pub rate_limiter: RateLimiter,
}
