//! Administrator account
//!
//! The site has a single administrator whose credentials live in the
//! environment rather than in the users table.

use anyhow::Result;

use crate::password::verify_password;

/// Administrator credentials
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

impl AdminAccount {
    /// Load the administrator account from environment variables
    ///
    /// # Environment Variables
    /// - `ADMIN_USERNAME`: Administrator login
    /// - `ADMIN_PASSWORD_HASH`: Argon2 hash of the administrator password
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("ADMIN_USERNAME")
            .map_err(|_| anyhow::anyhow!("ADMIN_USERNAME environment variable not set"))?;
        let password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .map_err(|_| anyhow::anyhow!("ADMIN_PASSWORD_HASH environment variable not set"))?;

        argon2::PasswordHash::new(&password_hash)
            .map_err(|e| anyhow::anyhow!("ADMIN_PASSWORD_HASH is not a valid hash: {}", e))?;

        Ok(Self {
            username,
            password_hash,
        })
    }

    /// Check a login attempt against the account
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        // Always verify the hash, whatever the username
        let password_ok = verify_password(&self.password_hash, password);
        password_ok && username == self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::tests::hash;
    use serial_test::serial;

    #[test]
    fn test_authenticate() {
        let admin = AdminAccount {
            username: "gerant".to_string(),
            password_hash: hash("Admin-Pass-1"),
        };

        assert!(admin.authenticate("gerant", "Admin-Pass-1"));
        assert!(!admin.authenticate("gerant", "admin-pass-1"));
        assert!(!admin.authenticate("root", "Admin-Pass-1"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_hash() {
        unsafe {
            std::env::set_var("ADMIN_USERNAME", "gerant");
            std::env::set_var("ADMIN_PASSWORD_HASH", "plaintext");
        }
        assert!(AdminAccount::from_env().is_err());

        let hashed = hash("Admin-Pass-1");
        unsafe {
            std::env::set_var("ADMIN_PASSWORD_HASH", &hashed);
        }
        let admin = AdminAccount::from_env().unwrap();
        assert_eq!(admin.username, "gerant");
        assert_eq!(admin.password_hash, hashed);

        unsafe {
            std::env::remove_var("ADMIN_USERNAME");
            std::env::remove_var("ADMIN_PASSWORD_HASH");
        }
    }
}
