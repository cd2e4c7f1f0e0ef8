//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another record already owns the email address.
        DuplicateEmail { email: String } => "a user with email {email} already exists",
    }
}

/// Port for identity record storage.
///
/// Email uniqueness is enforced by the store itself so concurrent
/// registrations for the same address cannot both succeed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// already taken; nothing is written in that case.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Replace the name, email, password hash and flags of an existing record.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the new email
    /// collides and [`UserPersistenceError::Query`] when the record is missing.
    async fn update(&self, user: &User) -> Result<(), UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_email_message_names_the_address() {
        let err = UserPersistenceError::duplicate_email("chef@example.com");
        assert_eq!(
            err.to_string(),
            "a user with email chef@example.com already exists"
        );
    }

    #[rstest]
    fn connection_constructor_accepts_str() {
        let err = UserPersistenceError::connection("refused");
        assert_eq!(
            err,
            UserPersistenceError::Connection {
                message: "refused".to_owned()
            }
        );
    }
}
