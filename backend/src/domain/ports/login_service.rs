//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange credentials for a session token without knowing (or importing)
//! the backing infrastructure. Handler tests substitute a mock instead of
//! wiring persistence.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the caller's session token.
    ///
    /// Repeated successful calls for the same identity return the same token.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error>;
}
