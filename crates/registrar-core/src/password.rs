//! Password hashing and verification using bcrypt.
//!
//! The bcrypt hash string embeds its own salt and cost, so a stored hash is
//! all that is needed to verify a password later.

use bcrypt::{hash, verify};

pub use bcrypt::DEFAULT_COST;

use crate::errors::AppError;

/// Hashes a password with the default bcrypt cost.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hashes a password with an explicit bcrypt cost (4..=31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Verifies a password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch and an error only when the stored hash is
/// malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password_with_cost("s3cret-pass", 4).unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("s3cret-pass", &hash).unwrap());
        assert!(!verify_password("wrong-pass", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let first = hash_password_with_cost("same", 4).unwrap();
        let second = hash_password_with_cost("same", 4).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_hash_is_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
