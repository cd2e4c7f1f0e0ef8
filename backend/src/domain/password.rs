//! Password policy and opaque password hashes.
//!
//! Plaintext passwords only ever live inside [`Password`], which zeroes its
//! buffer on drop and never prints its content.

use std::fmt;

use zeroize::Zeroizing;

use super::user::UserValidationError;

/// Minimum number of characters a password must contain.
pub const PASSWORD_MIN_LENGTH: usize = 5;

/// Plaintext password that satisfies the length policy.
///
/// ## Invariants
/// - At least [`PASSWORD_MIN_LENGTH`] characters, counted as Unicode scalar
///   values.
/// - Whitespace is preserved exactly as supplied.
///
/// # Examples
/// ```
/// use recipe_backend::domain::Password;
///
/// assert!(Password::new("1234").is_err());
/// let password = Password::new("12345").unwrap();
/// assert_eq!(password.expose(), "12345");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate raw input against the password policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = Zeroizing::new(raw.into());
        if raw.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(UserValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Borrow the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// One-way hash of a password, stored in place of the plaintext.
///
/// The content is opaque to the domain; only a
/// [`PasswordHasher`](crate::domain::ports::PasswordHasher) can interpret it.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher or read from storage.
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }

    /// Wrap a hash an adapter produced itself and knows to be non-empty.
    pub(crate) fn from_trusted(encoded: String) -> Self {
        Self(encoded)
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
