//! Password hashing for stored accounts. Plaintext passwords never leave this module.

use crate::error::AppError;

/// bcrypt work factor used for every stored password.
pub const HASH_COST: u32 = 10;

/// Salted bcrypt hash of `plaintext`, ready to persist on a `User`.
pub fn hash_password(plaintext: &str) -> Result<String, AppError> {
    Ok(bcrypt::hash(plaintext, HASH_COST)?)
}

/// Compares a login attempt against a stored hash.
///
/// A stored value that is not a bcrypt hash is a server-side error, not a mismatch.
pub fn verify_password(attempt: &str, stored_hash: &str) -> Result<bool, AppError> {
    Ok(bcrypt::verify(attempt, stored_hash)?)
}
