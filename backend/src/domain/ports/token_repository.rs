//! Port for session token persistence.
//!
//! Each identity owns at most one token. Adapters enforce the rule with a
//! unique constraint and resolve concurrent first logins by returning
//! whichever token was stored first.

use async_trait::async_trait;

use crate::domain::{AuthToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token repository adapters.
    pub enum TokenPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "token repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "token repository query failed: {message}",
    }
}

/// Port for storing and resolving session tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Fetch the token already issued to a user, if any.
    async fn find_for_user(&self, user_id: &UserId)
    -> Result<Option<AuthToken>, TokenPersistenceError>;

    /// Store `candidate` unless the user already has a token, then return the
    /// token that is stored for the user.
    async fn insert_if_absent(
        &self,
        user_id: &UserId,
        candidate: &AuthToken,
    ) -> Result<AuthToken, TokenPersistenceError>;

    /// Resolve a token to the user it was issued to.
    async fn find_user_id(&self, token: &AuthToken)
    -> Result<Option<UserId>, TokenPersistenceError>;
}
