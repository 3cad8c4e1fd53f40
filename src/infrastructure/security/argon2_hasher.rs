//! Argon2id implementation of [`PasswordHasher`].

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use serde_json::json;

use crate::domain::password_hasher::PasswordHasher;
use crate::error::AppError;

/// Salt length in bytes before base64 encoding.
const SALT_LEN: usize = 16;

/// Argon2id hasher with the crate's default cost parameters.
///
/// Hashes are PHC strings (`$argon2id$v=19$...`) that embed the salt and
/// parameters, so verification needs nothing besides the stored string.
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, AppError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        getrandom::fill(&mut salt_bytes).map_err(|e| {
            AppError::internal("Failed to generate salt", json!({ "reason": e.to_string() }))
        })?;

        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
            AppError::internal("Failed to encode salt", json!({ "reason": e.to_string() }))
        })?;

        self.argon2
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                AppError::internal("Failed to hash password", json!({ "reason": e.to_string() }))
            })
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            AppError::internal(
                "Stored password hash is malformed",
                json!({ "reason": e.to_string() }),
            )
        })?;

        Ok(self
            .argon2
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}
