//! Port for one-way salted password hashing.
//!
//! A synchronous interface is intentional: hashing is CPU-only and performs
//! no I/O. Production wiring uses the Argon2 adapter; tests use the
//! deterministic fixture below.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing the plaintext failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        Malformed { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Port for hashing and verifying passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a policy-compliant password with a fresh salt.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Check a plaintext candidate against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; errors are reserved for unusable hashes.
    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;

    /// Hash with the same cost as real records, verified against when an
    /// email is unknown so lookups and mismatches take similar time.
    fn decoy_hash(&self) -> PasswordHash;
}

/// Deterministic hasher for tests.
///
/// Encodes the plaintext as hex behind a `fixture$` prefix. Never wire this
/// into a real server.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

#[cfg(any(test, feature = "test-support"))]
impl FixturePasswordHasher {
    const PREFIX: &'static str = "fixture$";

    fn encode(plaintext: &str) -> String {
        format!("{}{}", Self::PREFIX, hex::encode(plaintext))
    }
}

#[cfg(any(test, feature = "test-support"))]
impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        PasswordHash::new(Self::encode(password.expose()))
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        if !hash.as_str().starts_with(Self::PREFIX) {
            return Err(PasswordHashError::malformed("missing fixture prefix"));
        }
        Ok(hash.as_str() == Self::encode(candidate))
    }

    fn decoy_hash(&self) -> PasswordHash {
        PasswordHash::from_trusted(Self::encode("decoy-password"))
    }
}
