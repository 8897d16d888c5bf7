//! Session cookie construction

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Attributes applied to every session cookie
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    /// Only send the cookie over HTTPS
    pub secure: bool,
}

impl CookieSettings {
    /// Create cookie settings from environment variables
    ///
    /// # Environment Variables
    /// - `APP_ENV`: cookies are marked `Secure` when set to `production`
    pub fn from_env() -> Self {
        let secure = std::env::var("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Self { secure }
    }

    /// Cookie carrying a freshly issued session token
    pub fn session(&self, name: &'static str, token: String) -> Cookie<'static> {
        Cookie::build((name, token))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .path("/")
            .build()
    }

    /// Empty cookie that makes the browser drop the session immediately
    pub fn cleared(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.session(name, String::new());
        cookie.make_removal();
        cookie
    }
}
