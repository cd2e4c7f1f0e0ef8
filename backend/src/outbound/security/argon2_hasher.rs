//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashes are PHC strings carrying their own salt and parameters, so records
//! written with older parameters still verify after a cost change.

use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::{Rng, distributions::Alphanumeric};
use tracing::warn;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Argon2id hasher with a precomputed decoy hash.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    decoy: PasswordHash,
}

impl std::fmt::Debug for Argon2PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2PasswordHasher")
            .field("params", self.argon2.params())
            .finish_non_exhaustive()
    }
}

impl Argon2PasswordHasher {
    /// Build a hasher with the crate's default Argon2id parameters.
    ///
    /// # Errors
    ///
    /// Fails only if the decoy hash cannot be computed.
    pub fn new() -> Result<Self, PasswordHashError> {
        Self::with_params(Params::default())
    }

    /// Build a hasher with explicit cost parameters.
    ///
    /// # Errors
    ///
    /// Fails if the decoy hash cannot be computed with `params`.
    pub fn with_params(params: Params) -> Result<Self, PasswordHashError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let decoy_plaintext: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let decoy = hash_with(&argon2, &decoy_plaintext)?;
        Ok(Self { argon2, decoy })
    }
}

fn hash_with(argon2: &Argon2<'_>, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::hash(err.to_string()))?
        .to_string();
    PasswordHash::new(encoded).map_err(|err| PasswordHashError::hash(err.to_string()))
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        hash_with(&self.argon2, password.expose())
    }

    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let parsed = PhcHash::new(hash.as_str()).map_err(|err| {
            warn!(error = %err, "stored password hash is not a PHC string");
            PasswordHashError::malformed(err.to_string())
        })?;

        match self.argon2.verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed(err.to_string())),
        }
    }

    fn decoy_hash(&self) -> PasswordHash {
        self.decoy.clone()
    }
}
