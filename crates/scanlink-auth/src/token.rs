//! Pairing token generation and validation
//!
//! A token is the single shared secret between the desktop and the phone. It
//! travels inside the QR-coded URL and must accompany every scan submission.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::Rng;

/// Bytes of entropy per generated token
pub const TOKEN_ENTROPY_BYTES: usize = 16;

/// Generate a fresh random URL-safe pairing token
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; TOKEN_ENTROPY_BYTES] = rng.gen();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Check a submitted token against the session's expected token
///
/// Case-sensitive; a missing or empty submission never matches.
pub fn validate(provided: Option<&str>, expected: &str) -> bool {
    match provided {
        Some(provided) if !provided.is_empty() => provided == expected,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_distinct() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_token_is_url_safe() {
        let token = generate();
        // 16 bytes -> 22 chars of unpadded base64
        assert_eq!(token.len(), 22);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_validate_accepts_exact_match() {
        assert!(validate(Some("abc123"), "abc123"));
    }

    #[test]
    fn test_validate_is_case_sensitive() {
        assert!(!validate(Some("ABC123"), "abc123"));
    }

    #[test]
    fn test_validate_rejects_missing_or_empty() {
        assert!(!validate(None, "abc123"));
        assert!(!validate(Some(""), "abc123"));
        assert!(!validate(Some(""), ""));
    }

    #[test]
    fn test_validate_rejects_wrong_token() {
        assert!(!validate(Some("nope"), "abc123"));
    }
}
