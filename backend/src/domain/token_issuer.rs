//! Credential checks and session token issuance.
//!
//! Every credential failure collapses into [`IdentityError::AuthFailed`] so
//! callers cannot probe which emails are registered.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    LoginService, PasswordHasher, TokenAuthenticator, TokenRepository, UserRepository,
};
use crate::domain::{AuthToken, Error, IdentityError, LoginCredentials, User, UserId};

/// Authenticates credentials and hands out one token per identity.
pub struct TokenIssuer<U: ?Sized, T: ?Sized, H: ?Sized> {
    users: Arc<U>,
    tokens: Arc<T>,
    hasher: Arc<H>,
}

impl<U: ?Sized, T: ?Sized, H: ?Sized> Clone for TokenIssuer<U, T, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            tokens: Arc::clone(&self.tokens),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<U, T, H> TokenIssuer<U, T, H>
where
    U: UserRepository + ?Sized,
    T: TokenRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    /// Create an issuer over the given stores and hasher.
    pub fn new(users: Arc<U>, tokens: Arc<T>, hasher: Arc<H>) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    /// Check credentials and return the user's token, creating it on first
    /// success.
    ///
    /// # Errors
    /// [`IdentityError::AuthFailed`] for an unknown email, a wrong password or
    /// an inactive account. Store failures surface as
    /// [`IdentityError::Unavailable`] or [`IdentityError::Internal`].
    pub async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthToken, IdentityError> {
        let user = self.verified_user(credentials).await?;
        self.token_for(user.id()).await
    }

    /// Resolve a presented token to an active user.
    ///
    /// # Errors
    /// [`IdentityError::Unauthorized`] when the token is unknown or its owner
    /// is missing or inactive.
    pub async fn resolve(&self, token: &AuthToken) -> Result<User, IdentityError> {
        let user_id = self
            .tokens
            .find_user_id(token)
            .await?
            .ok_or(IdentityError::Unauthorized)?;
        match self.users.find_by_id(&user_id).await? {
            Some(user) if user.is_active() => Ok(user),
            _ => Err(IdentityError::Unauthorized),
        }
    }

    async fn verified_user(&self, credentials: &LoginCredentials) -> Result<User, IdentityError> {
        let Some(user) = self.users.find_by_email(credentials.email()).await? else {
            // Spend the same hashing effort as a real mismatch.
            let _ = self
                .hasher
                .verify(credentials.password(), &self.hasher.decoy_hash());
            return Err(IdentityError::AuthFailed);
        };

        if !self
            .hasher
            .verify(credentials.password(), user.password_hash())?
        {
            return Err(IdentityError::AuthFailed);
        }
        if !user.is_active() {
            return Err(IdentityError::AuthFailed);
        }
        Ok(user)
    }

    async fn token_for(&self, user_id: &UserId) -> Result<AuthToken, IdentityError> {
        if let Some(existing) = self.tokens.find_for_user(user_id).await? {
            return Ok(existing);
        }
        let stored = self
            .tokens
            .insert_if_absent(user_id, &AuthToken::generate())
            .await?;
        Ok(stored)
    }
}

#[async_trait]
impl<U, T, H> LoginService for TokenIssuer<U, T, H>
where
    U: UserRepository + ?Sized,
    T: TokenRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        Ok(TokenIssuer::authenticate(self, credentials).await?)
    }
}

#[async_trait]
impl<U, T, H> TokenAuthenticator for TokenIssuer<U, T, H>
where
    U: UserRepository + ?Sized,
    T: TokenRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn resolve(&self, token: &AuthToken) -> Result<UserId, Error> {
        let user = TokenIssuer::resolve(self, token).await?;
        Ok(*user.id())
    }
}

#[cfg(test)]
#[path = "token_issuer_tests.rs"]
mod tests;
