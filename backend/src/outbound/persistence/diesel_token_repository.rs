//! PostgreSQL-backed `TokenRepository` implementation using Diesel ORM.
//!
//! `auth_tokens.user_id` is unique. First-token issuance inserts with
//! `ON CONFLICT (user_id) DO NOTHING` and then reads back the stored key, so
//! racing logins for one user all observe the same token.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{TokenPersistenceError, TokenRepository};
use crate::domain::{AuthToken, UserId};

use super::diesel_error_mapping::{DieselFailure, classify, pool_error_message};
use super::models::NewTokenRow;
use super::pool::{DbPool, PoolError};
use super::schema::auth_tokens;

/// Diesel-backed implementation of the [`TokenRepository`] port.
#[derive(Clone)]
pub struct DieselTokenRepository {
    pool: DbPool,
}

impl DieselTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TokenPersistenceError {
    TokenPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> TokenPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => TokenPersistenceError::connection(message),
        DieselFailure::UniqueViolation { constraint } => TokenPersistenceError::query(format!(
            "token key collision on {}",
            constraint.as_deref().unwrap_or("auth_tokens")
        )),
        DieselFailure::ForeignKeyViolation { .. } => {
            TokenPersistenceError::query("token owner does not exist")
        }
        DieselFailure::Query(message) => TokenPersistenceError::query(message),
    }
}

fn parse_stored(key: String) -> Result<AuthToken, TokenPersistenceError> {
    AuthToken::parse(&key).map_err(|err| {
        warn!(error = %err, "stored token has an unexpected format");
        TokenPersistenceError::query(format!("stored token is malformed: {err}"))
    })
}

#[async_trait]
impl TokenRepository for DieselTokenRepository {
    async fn find_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AuthToken>, TokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let key: Option<String> = auth_tokens::table
            .filter(auth_tokens::user_id.eq(user_id.as_uuid()))
            .select(auth_tokens::key)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        key.map(parse_stored).transpose()
    }

    async fn insert_if_absent(
        &self,
        user_id: &UserId,
        candidate: &AuthToken,
    ) -> Result<AuthToken, TokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = diesel::insert_into(auth_tokens::table)
            .values(&NewTokenRow {
                key: candidate.as_str(),
                user_id: *user_id.as_uuid(),
            })
            .on_conflict(auth_tokens::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if inserted == 0 {
            debug!(user_id = %user_id, "token already issued; returning stored key");
        }

        let key: String = auth_tokens::table
            .filter(auth_tokens::user_id.eq(user_id.as_uuid()))
            .select(auth_tokens::key)
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        parse_stored(key)
    }

    async fn find_user_id(
        &self,
        token: &AuthToken,
    ) -> Result<Option<UserId>, TokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_id: Option<uuid::Uuid> = auth_tokens::table
            .find(token.as_str())
            .select(auth_tokens::user_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(user_id.map(UserId::from_uuid))
    }
}
