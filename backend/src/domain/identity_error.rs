//! Failure taxonomy for the identity services.
//!
//! Services return [`IdentityError`]; driving-port implementations convert it
//! into the transport-agnostic [`Error`] payload.

use serde_json::json;

use super::Error;
use super::auth::LoginValidationError;
use super::ports::{PasswordHashError, TokenPersistenceError, UserPersistenceError};
use super::user::UserValidationError;

/// Message returned for every failed credential check.
pub const AUTH_FAILED_MESSAGE: &str = "unable to authenticate with provided credentials";

/// Errors raised by user creation, authentication and profile updates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// Input failed validation (email, name, or password policy).
    #[error(transparent)]
    InvalidIdentity(#[from] UserValidationError),
    /// The normalised email already belongs to another account.
    #[error("a user with this email already exists")]
    DuplicateIdentity,
    /// Credentials were rejected. Unknown email, wrong password and inactive
    /// accounts are deliberately indistinguishable.
    #[error("unable to authenticate with provided credentials")]
    AuthFailed,
    /// No valid session token was presented.
    #[error("authentication credentials were not provided or are invalid")]
    Unauthorized,
    /// A backing store could not be reached.
    #[error("identity store unavailable: {message}")]
    Unavailable {
        /// Adapter-supplied detail.
        message: String,
    },
    /// Any other failure inside an adapter.
    #[error("identity service failure: {message}")]
    Internal {
        /// Adapter-supplied detail.
        message: String,
    },
}

impl From<UserPersistenceError> for IdentityError {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::Connection { message } => Self::Unavailable { message },
            UserPersistenceError::Query { message } => Self::Internal { message },
            UserPersistenceError::DuplicateEmail { .. } => Self::DuplicateIdentity,
        }
    }
}

impl From<TokenPersistenceError> for IdentityError {
    fn from(value: TokenPersistenceError) -> Self {
        match value {
            TokenPersistenceError::Connection { message } => Self::Unavailable { message },
            TokenPersistenceError::Query { message } => Self::Internal { message },
        }
    }
}

impl From<PasswordHashError> for IdentityError {
    fn from(value: PasswordHashError) -> Self {
        Self::Internal {
            message: value.to_string(),
        }
    }
}

impl From<LoginValidationError> for IdentityError {
    fn from(value: LoginValidationError) -> Self {
        match value {
            LoginValidationError::EmptyPassword => Self::AuthFailed,
            LoginValidationError::InvalidEmail(error) => Self::InvalidIdentity(error),
        }
    }
}

impl From<IdentityError> for Error {
    fn from(value: IdentityError) -> Self {
        match value {
            IdentityError::InvalidIdentity(error) => Error::invalid_request(error.to_string())
                .with_details(json!({ "field": error.field(), "code": error.code() })),
            IdentityError::DuplicateIdentity => {
                Error::invalid_request("a user with this email already exists")
                    .with_details(json!({ "field": "email", "code": "duplicate_email" }))
            }
            IdentityError::AuthFailed => Error::invalid_request(AUTH_FAILED_MESSAGE)
                .with_details(json!({ "code": "authentication_failed" })),
            IdentityError::Unauthorized => {
                Error::unauthorized("authentication credentials were not provided or are invalid")
            }
            IdentityError::Unavailable { message } => Error::service_unavailable(message),
            IdentityError::Internal { message } => Error::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("down"), IdentityError::Unavailable { message: "down".to_owned() })]
    #[case(UserPersistenceError::query("boom"), IdentityError::Internal { message: "boom".to_owned() })]
    #[case(UserPersistenceError::duplicate_email("a@b.c"), IdentityError::DuplicateIdentity)]
    fn user_persistence_errors_map(
        #[case] source: UserPersistenceError,
        #[case] expected: IdentityError,
    ) {
        assert_eq!(IdentityError::from(source), expected);
    }

    #[rstest]
    #[case(IdentityError::InvalidIdentity(UserValidationError::EmptyEmail), ErrorCode::InvalidRequest)]
    #[case(IdentityError::DuplicateIdentity, ErrorCode::InvalidRequest)]
    #[case(IdentityError::AuthFailed, ErrorCode::InvalidRequest)]
    #[case(IdentityError::Unauthorized, ErrorCode::Unauthorized)]
    #[case(IdentityError::Unavailable { message: "x".to_owned() }, ErrorCode::ServiceUnavailable)]
    #[case(IdentityError::Internal { message: "x".to_owned() }, ErrorCode::InternalError)]
    fn identity_errors_map_to_payload_codes(
        #[case] source: IdentityError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(Error::from(source).code(), expected);
    }

    #[rstest]
    fn validation_errors_carry_field_details() {
        let error = Error::from(IdentityError::InvalidIdentity(
            UserValidationError::PasswordTooShort { min: 5 },
        ));
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "password", "code": "password_too_short" }))
        );
    }

    #[rstest]
    fn blank_login_password_collapses_into_auth_failure() {
        assert_eq!(
            IdentityError::from(LoginValidationError::EmptyPassword),
            IdentityError::AuthFailed
        );
    }

    #[rstest]
    fn auth_failure_message_is_generic() {
        let error = Error::from(IdentityError::AuthFailed);
        assert_eq!(error.message(), AUTH_FAILED_MESSAGE);
    }
}
