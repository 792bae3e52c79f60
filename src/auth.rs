//! Password hashing.
//!
//! The resolvers only see the [`PasswordHasher`] trait; [`Argon2Hasher`] is the
//! production implementation (argon2id, library default cost).

use crate::error::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};

/// One-way password hashing service
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing hash string
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch and `Err` when the stored hash can't be parsed.
    fn verify(&self, hash: &str, password: &str) -> Result<bool>;
}

#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::PasswordHash(e.to_string()))
    }

    fn verify(&self, hash: &str, password: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| AppError::PasswordHash(e.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::PasswordHash(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_plaintext_and_is_salted() {
        let hasher = Argon2Hasher::new();
        let a = hasher.hash("secret1").unwrap();
        let b = hasher.hash("secret1").unwrap();
        assert!(a.starts_with("$argon2id$"));
        assert!(!a.contains("secret1"));
        assert_ne!(a, b);
    }

    #[test]
    fn verify_accepts_only_the_original_password() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("secret1").unwrap();
        assert!(hasher.verify(&hash, "secret1").unwrap());
        assert!(!hasher.verify(&hash, "secret2").unwrap());
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        let hasher = Argon2Hasher::new();
        assert!(matches!(
            hasher.verify("not-a-hash", "secret1"),
            Err(AppError::PasswordHash(_))
        ));
    }
}
