//! Driving port resolving a presented session token to an identity.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, UserId};

/// Domain use-case port for bearer token checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Return the active user the token was issued to.
    ///
    /// Unknown tokens and inactive users both fail as unauthorised.
    async fn resolve(&self, token: &AuthToken) -> Result<UserId, Error>;
}
