//! Cookie-based identity verification
//!
//! A verifier reads one named cookie, checks the token it holds and projects
//! the claims into a typed identity. A missing cookie, a bad token and a token
//! issued for the other role all yield `None`.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use tracing::warn;

use crate::token::{Subject, TokenCodec};

/// Cookie holding the user session token
pub const USER_COOKIE: &str = "authToken";

/// Cookie holding the admin session token
pub const ADMIN_COOKIE: &str = "adminAuthToken";

/// Authenticated site user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Authenticated administrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminIdentity {
    pub connected: bool,
}

/// Turns a request's cookies into an identity
pub trait IdentityVerifier: Clone + Send + Sync + 'static {
    /// Identity produced on success
    type Identity: Clone + Send + Sync + 'static;

    /// Name of the cookie carrying the token
    const COOKIE: &'static str;

    fn codec(&self) -> &TokenCodec;

    /// Map decoded claims to the identity, `None` if the role does not match
    fn project(subject: Subject) -> Option<Self::Identity>;

    /// Verify the request's session cookie
    fn verify(&self, headers: &HeaderMap) -> Option<Self::Identity> {
        let jar = CookieJar::from_headers(headers);
        let token = jar
            .get(Self::COOKIE)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())?;

        let claims = match self.codec().verify(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(cookie = Self::COOKIE, "Rejected session token: {}", e);
                return None;
            }
        };

        let identity = Self::project(claims.subject);
        if identity.is_none() {
            warn!(cookie = Self::COOKIE, "Session token issued for another role");
        }
        identity
    }
}

/// Verifier for the `authToken` cookie
#[derive(Clone)]
pub struct UserVerifier {
    codec: TokenCodec,
}

impl UserVerifier {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }
}

impl IdentityVerifier for UserVerifier {
    type Identity = UserIdentity;
    const COOKIE: &'static str = USER_COOKIE;

    fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    fn project(subject: Subject) -> Option<UserIdentity> {
        match subject {
            Subject::User(user) => Some(UserIdentity {
                id: user.id,
                first_name: user.first_name,
                last_name: user.last_name,
                email: user.email,
            }),
            Subject::Admin(_) => None,
        }
    }
}

/// Verifier for the `adminAuthToken` cookie
#[derive(Clone)]
pub struct AdminVerifier {
    codec: TokenCodec,
}

impl AdminVerifier {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }
}

impl IdentityVerifier for AdminVerifier {
    type Identity = AdminIdentity;
    const COOKIE: &'static str = ADMIN_COOKIE;

    fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    fn project(subject: Subject) -> Option<AdminIdentity> {
        match subject {
            Subject::Admin(_) => Some(AdminIdentity { connected: true }),
            Subject::User(_) => None,
        }
    }
}
