/**
 * Password Hashing
 *
 * bcrypt with a configurable cost. The salt and cost are embedded in the
 * hash string, so nothing besides the hash needs to be stored.
 */

use crate::backend::error::BackendError;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password
    ///
    /// # Errors
    /// `Internal` if bcrypt rejects the input (e.g. an interior NUL byte)
    pub fn hash(&self, plaintext: &str) -> Result<String, BackendError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            BackendError::internal("password hashing failed")
        })
    }

    /// Check a plaintext password against a stored hash
    ///
    /// A malformed hash verifies as `false` rather than erroring.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or_else(|e| {
            tracing::warn!("Stored password hash could not be checked: {}", e);
            false
        })
    }
}
