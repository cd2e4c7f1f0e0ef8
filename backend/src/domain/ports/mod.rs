//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher) are implemented by outbound adapters.
//! Driving ports (login, registration, profile) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod recipe_repository;
mod token_authenticator;
mod token_repository;
mod user_profile_command;
mod user_profile_query;
mod user_registration;
mod user_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(any(test, feature = "test-support"))]
pub use password_hasher::FixturePasswordHasher;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipePersistenceError, RecipeRepository};
#[cfg(test)]
pub use token_authenticator::MockTokenAuthenticator;
pub use token_authenticator::TokenAuthenticator;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
pub use token_repository::{TokenPersistenceError, TokenRepository};
#[cfg(test)]
pub use user_profile_command::MockUserProfileCommand;
pub use user_profile_command::{UpdateProfileRequest, UserProfileCommand};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::{RegisterUserRequest, UserRegistration};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
