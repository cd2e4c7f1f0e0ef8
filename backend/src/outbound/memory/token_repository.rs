//! In-memory session token store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{TokenPersistenceError, TokenRepository};
use crate::domain::{AuthToken, UserId};

use super::lock;

#[derive(Debug, Default)]
struct Tokens {
    by_user: HashMap<UserId, AuthToken>,
    users_by_token: HashMap<AuthToken, UserId>,
}

/// [`TokenRepository`] kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryTokenRepository {
    tokens: Mutex<Tokens>,
}

impl InMemoryTokenRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AuthToken>, TokenPersistenceError> {
        let tokens = lock(&self.tokens, TokenPersistenceError::query)?;
        Ok(tokens.by_user.get(user_id).cloned())
    }

    async fn insert_if_absent(
        &self,
        user_id: &UserId,
        candidate: &AuthToken,
    ) -> Result<AuthToken, TokenPersistenceError> {
        let mut tokens = lock(&self.tokens, TokenPersistenceError::query)?;
        if let Some(existing) = tokens.by_user.get(user_id) {
            return Ok(existing.clone());
        }
        tokens.by_user.insert(*user_id, candidate.clone());
        tokens.users_by_token.insert(candidate.clone(), *user_id);
        Ok(candidate.clone())
    }

    async fn find_user_id(
        &self,
        token: &AuthToken,
    ) -> Result<Option<UserId>, TokenPersistenceError> {
        let tokens = lock(&self.tokens, TokenPersistenceError::query)?;
        Ok(tokens.users_by_token.get(token).copied())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn first_inserted_token_wins() {
        let repo = InMemoryTokenRepository::new();
        let user_id = UserId::random();
        let first = AuthToken::generate();
        let second = AuthToken::generate();

        let stored_first = repo.insert_if_absent(&user_id, &first).await.expect("insert");
        let stored_second = repo
            .insert_if_absent(&user_id, &second)
            .await
            .expect("insert");

        assert_eq!(stored_first, first);
        assert_eq!(stored_second, first);
        assert_eq!(
            repo.find_user_id(&second).await.expect("lookup"),
            None,
            "losing candidate must not resolve"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn tokens_resolve_to_owner() {
        let repo = InMemoryTokenRepository::new();
        let user_id = UserId::random();
        let token = AuthToken::generate();
        repo.insert_if_absent(&user_id, &token).await.expect("insert");

        assert_eq!(
            repo.find_user_id(&token).await.expect("lookup"),
            Some(user_id)
        );
        assert_eq!(
            repo.find_for_user(&user_id).await.expect("lookup"),
            Some(token)
        );
    }
}
