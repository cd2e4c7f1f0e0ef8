//! Opaque session tokens bound to a single identity.

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;

/// Number of random bytes behind each token.
pub const TOKEN_BYTES: usize = 20;

/// Length of the hex-encoded token.
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// Errors raised when parsing a presented token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenFormatError {
    /// Token had the wrong number of characters.
    #[error("token must be {expected} characters long")]
    InvalidLength {
        /// Required length.
        expected: usize,
    },
    /// Token contained characters outside lowercase hex.
    #[error("token must contain only lowercase hexadecimal characters")]
    InvalidCharacters,
}

/// Opaque session token.
///
/// ## Invariants
/// - Exactly [`TOKEN_LENGTH`] lowercase hexadecimal characters.
///
/// # Examples
/// ```
/// use recipe_backend::domain::AuthToken;
///
/// let token = AuthToken::generate();
/// let parsed = AuthToken::parse(token.as_str()).unwrap();
/// assert_eq!(parsed, token);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    /// Generate a fresh token from the operating system RNG.
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Validate a token presented by a client or read from storage.
    pub fn parse(raw: &str) -> Result<Self, TokenFormatError> {
        if raw.len() != TOKEN_LENGTH {
            return Err(TokenFormatError::InvalidLength {
                expected: TOKEN_LENGTH,
            });
        }
        if !raw
            .bytes()
            .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
        {
            return Err(TokenFormatError::InvalidCharacters);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Encoded token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn generated_tokens_are_lowercase_hex() {
        let token = AuthToken::generate();
        assert_eq!(token.as_str().len(), TOKEN_LENGTH);
        assert!(AuthToken::parse(token.as_str()).is_ok());
    }

    #[rstest]
    fn generated_tokens_differ() {
        assert_ne!(AuthToken::generate(), AuthToken::generate());
    }

    #[rstest]
    #[case("", TokenFormatError::InvalidLength { expected: TOKEN_LENGTH })]
    #[case("abc", TokenFormatError::InvalidLength { expected: TOKEN_LENGTH })]
    #[case(
        "ABCDEF0123456789abcdef0123456789abcdef01",
        TokenFormatError::InvalidCharacters
    )]
    #[case(
        "zzzzzz0123456789abcdef0123456789abcdef01",
        TokenFormatError::InvalidCharacters
    )]
    fn malformed_tokens_are_rejected(#[case] raw: &str, #[case] expected: TokenFormatError) {
        assert_eq!(AuthToken::parse(raw).expect_err("malformed token"), expected);
    }

    #[rstest]
    fn debug_output_hides_token() {
        let token = AuthToken::parse("0123456789abcdef0123456789abcdef01234567").expect("valid");
        assert!(!format!("{token:?}").contains("0123"));
    }
}
