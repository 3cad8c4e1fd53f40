//! One-way password hashing capability.

use crate::error::AppError;

/// Hashes link passwords and verifies candidates against stored hashes.
///
/// Implementations must salt every hash and compare in constant time.
///
/// # Implementations
///
/// - [`crate::infrastructure::security::Argon2PasswordHasher`] - Argon2id
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produces an opaque, self-describing hash of `plain`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if hashing fails.
    fn hash(&self, plain: &str) -> Result<String, AppError>;

    /// Checks `plain` against a hash produced by [`PasswordHasher::hash`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the stored hash cannot be parsed.
    fn verify(&self, plain: &str, hash: &str) -> Result<bool, AppError>;
}
