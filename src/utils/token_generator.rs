//! Random token generation for masked links.
//!
//! Tokens come from the operating system CSPRNG.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Number of random bytes behind each masked link token (8 characters encoded).
pub const TOKEN_SIZE_BYTES: usize = 6;

/// Generates `size` random bytes encoded as URL-safe base64 without padding.
///
/// The alphabet is `A-Z a-z 0-9 - _`. A `size` of zero yields an empty string.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let token = generate_token(6)?;
/// assert_eq!(token.len(), 8);
/// ```
pub fn generate_token(size: usize) -> Result<String, AppError> {
    let mut buffer = vec![0u8; size];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_token_has_expected_length() {
        let token = generate_token(TOKEN_SIZE_BYTES).unwrap();
        assert_eq!(token.len(), 8);
    }

    #[test]
    fn test_generate_token_length_without_padding() {
        // 4 * ceil(n / 3) minus the padding that is stripped
        assert_eq!(generate_token(1).unwrap().len(), 2);
        assert_eq!(generate_token(2).unwrap().len(), 3);
        assert_eq!(generate_token(3).unwrap().len(), 4);
        assert_eq!(generate_token(9).unwrap().len(), 12);
    }

    #[test]
    fn test_generate_token_url_safe_characters() {
        for _ in 0..100 {
            let token = generate_token(TOKEN_SIZE_BYTES).unwrap();
            assert!(
                token
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            );
            assert!(!token.contains('+'));
            assert!(!token.contains('/'));
            assert!(!token.contains('='));
        }
    }

    #[test]
    fn test_generate_token_zero_size() {
        assert_eq!(generate_token(0).unwrap(), "");
    }

    #[test]
    fn test_generate_token_produces_unique_tokens() {
        let mut tokens = HashSet::new();

        for _ in 0..1000 {
            tokens.insert(generate_token(TOKEN_SIZE_BYTES).unwrap());
        }

        assert_eq!(tokens.len(), 1000);
    }
}
