//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `users_email_key` constraint, so two
//! concurrent registrations for one address resolve to a single row and a
//! `DuplicateEmail` error for the loser.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    DisplayName, Email, PasswordHash, User, UserFlags, UserId, UserValidationError,
};

use super::diesel_error_mapping::{DieselFailure, classify, pool_error_message};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, email: &Email) -> UserPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation { .. } => {
            UserPersistenceError::duplicate_email(email.as_ref())
        }
        DieselFailure::ForeignKeyViolation { .. } => {
            UserPersistenceError::query("foreign key violation")
        }
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
        other => UserPersistenceError::query(format!("unexpected failure on read: {other:?}")),
    }
}

/// Rebuild a domain record from a stored row.
///
/// Stored rows were validated on the way in; a failure here means the table
/// was edited out of band.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    let invalid = |err: UserValidationError| {
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    };
    let email = Email::new(&row.email).map_err(invalid)?;
    let name = row
        .name
        .as_deref()
        .map(DisplayName::new)
        .transpose()
        .map_err(invalid)?;
    let password_hash = PasswordHash::new(row.password_hash).map_err(invalid)?;
    Ok(
        User::new(UserId::from_uuid(id), email, name, password_hash).with_flags(UserFlags {
            is_active: row.is_active,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
        }),
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let flags = user.flags();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            name: user.name().map(AsRef::as_ref),
            password_hash: user.password_hash().as_str(),
            is_active: flags.is_active,
            is_staff: flags.is_staff,
            is_superuser: flags.is_superuser,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, user.email()))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_user).transpose()
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let flags = user.flags();
        let changes = UserUpdate {
            email: user.email().as_ref(),
            name: user.name().map(AsRef::as_ref),
            password_hash: user.password_hash().as_str(),
            is_active: flags.is_active,
            is_staff: flags.is_staff,
            is_superuser: flags.is_superuser,
            updated_at: Utc::now(),
        };

        let updated = diesel::update(users::table.find(user.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, user.email()))?;

        if updated == 0 {
            return Err(UserPersistenceError::query(format!(
                "user {} not found for update",
                user.id()
            )));
        }
        Ok(())
    }
}
