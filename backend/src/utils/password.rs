//! Salted, adaptive password hashing with bcrypt.
//!
//! ## Usage
//!
//! ```rust
//! let hasher = PasswordHasher::new(bcrypt::DEFAULT_COST)?;
//! let stored = hasher.hash_password("secret")?;
//! assert!(hasher.verify_password("secret", &stored));
//! ```

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{hash, verify};

/// Never matches a real password; only burns the same amount of work.
const DUMMY_PASSWORD: &str = "authgate-timing-equalizer";

/// bcrypt hasher bound to a fixed cost.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher and precomputes the dummy hash used for unknown users.
    pub fn new(cost: u32) -> ServiceResult<Self> {
        let dummy_hash = hash(DUMMY_PASSWORD, cost)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a password with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> ServiceResult<String> {
        hash(password, self.cost)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Checks a password against a stored hash.
    ///
    /// A hash bcrypt cannot parse counts as a mismatch.
    pub fn verify_password(&self, password: &str, hashed_password: &str) -> bool {
        match verify(password, hashed_password) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Stored password hash could not be verified: {}", e);
                false
            }
        }
    }

    /// Spends one verification on the dummy hash so a lookup miss costs as
    /// much as a wrong password.
    pub fn verify_dummy(&self, password: &str) {
        let _ = verify(password, &self.dummy_hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let stored = hasher.hash_password("secret").unwrap();

        assert_ne!(stored, "secret");
        assert!(hasher.verify_password("secret", &stored));
        assert!(!hasher.verify_password("Secret", &stored));
        assert!(!hasher.verify_password("", &stored));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash_password("secret").unwrap();
        let second = hasher.hash_password("secret").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify_password("secret", &first));
        assert!(hasher.verify_password("secret", &second));
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        let hasher = hasher();
        assert!(!hasher.verify_password("secret", "not-a-bcrypt-hash"));
        assert!(!hasher.verify_password("secret", ""));
    }

    #[test]
    fn test_dummy_hash_never_matches_user_input() {
        let hasher = hasher();
        assert!(!hasher.verify_password("secret", &hasher.dummy_hash));
    }
}
