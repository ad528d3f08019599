//! bcrypt password hashing and verification.

use bcrypt::BcryptError;

pub use bcrypt::DEFAULT_COST;

/// Hash a plaintext password with a fresh salt at the given cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(password, cost)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch rather than an error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match bcrypt::verify(password, stored_hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            false
        }
    }
}
