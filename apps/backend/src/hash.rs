//! One-way password hash service.
//!
//! Hash comparison is CPU-heavy; callers run it via `web::block` so it
//! never stalls the async executor.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

pub trait HashService: Send + Sync {
    /// Hash a plaintext password into a PHC-format string.
    fn hash(&self, plain: &str) -> Result<String, HashError>;

    /// Compare a plaintext password against a stored PHC string. Any
    /// parse failure of the stored hash counts as a mismatch.
    fn verify(&self, plain: &str, hashed: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct Argon2HashService;

impl HashService for Argon2HashService {
    fn hash(&self, plain: &str) -> Result<String, HashError> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|e| HashError::Hash(e.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| HashError::Hash(e.to_string()))?;

        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|phc| phc.to_string())
            .map_err(|e| HashError::Hash(e.to_string()))
    }

    fn verify(&self, plain: &str, hashed: &str) -> bool {
        match PasswordHash::new(hashed) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
