//! Argon2 password verification

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use tracing::error;

/// Well-formed hash with the default Argon2id parameters that no password
/// matches. Checked when the login is unknown so both paths cost the same.
pub const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Check `password` against a PHC-formatted Argon2 hash.
///
/// An unparsable hash is logged and treated as a mismatch.
pub fn verify_password(password_hash: &str, password: &str) -> bool {
    let parsed_hash = match PasswordHash::new(password_hash) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to parse password hash: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
