//! User model and related functionality

use common::token::UserClaims;
use serde::Deserialize;
use sqlx::FromRow;

/// User entity
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Claims written into the user's session token
    pub fn claims(&self) -> UserClaims {
        UserClaims {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// User login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Admin login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginCredentials {
    pub username: String,
    pub password: String,
}
