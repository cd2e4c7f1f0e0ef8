//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed identity, token and recipe entities plus the
//! services that create users, issue tokens and manage profiles. Keep types
//! immutable outside their builders and document invariants in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - IdentityError — failure taxonomy of the identity services.
//! - User, Email, DisplayName, Password — identity record and its parts.
//! - UserFactory, TokenIssuer, ProfileService — driving-port implementations.

pub mod auth;
pub mod error;
pub mod identity_error;
pub mod password;
pub mod ports;
pub mod profile_service;
pub mod recipe;
pub mod token;
pub mod token_issuer;
pub mod trace_id;
pub mod user;
pub mod user_factory;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::identity_error::{AUTH_FAILED_MESSAGE, IdentityError};
pub use self::password::{PASSWORD_MIN_LENGTH, Password, PasswordHash};
pub use self::profile_service::ProfileService;
pub use self::recipe::{Price, Recipe, RecipeDraft, RecipeId, RecipeValidationError};
pub use self::token::{AuthToken, TokenFormatError};
pub use self::token_issuer::TokenIssuer;
pub use self::trace_id::TraceId;
pub use self::user::{
    DisplayName, Email, User, UserFlags, UserId, UserProfile, UserValidationError,
};
pub use self::user_factory::{NewUserFields, UserFactory};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recipe_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
