//! Account creation service.
//!
//! Normalises the email, enforces the password policy and hashes the password
//! before anything reaches storage. A failure at any step writes nothing.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{PasswordHasher, RegisterUserRequest, UserRegistration, UserRepository};
use crate::domain::{
    DisplayName, Email, Error, IdentityError, Password, User, UserFlags, UserId, UserProfile,
};

/// Optional attributes applied when creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserFields {
    /// Display name; validated when present.
    pub name: Option<String>,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Whether the account is staff.
    pub is_staff: bool,
    /// Whether the account holds every permission.
    pub is_superuser: bool,
}

impl Default for NewUserFields {
    fn default() -> Self {
        let flags = UserFlags::default();
        Self {
            name: None,
            is_active: flags.is_active,
            is_staff: flags.is_staff,
            is_superuser: flags.is_superuser,
        }
    }
}

impl NewUserFields {
    /// Default fields with the given display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Creates identity records from raw input.
pub struct UserFactory<U: ?Sized, H: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U: ?Sized, H: ?Sized> Clone for UserFactory<U, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<U, H> UserFactory<U, H>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    /// Create a factory over the given store and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }

    /// Create and persist a user.
    ///
    /// # Errors
    /// - [`IdentityError::InvalidIdentity`] when the email is empty or
    ///   malformed, the password is shorter than the policy minimum, or the
    ///   name is blank.
    /// - [`IdentityError::DuplicateIdentity`] when the normalised email is
    ///   already registered.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        fields: NewUserFields,
    ) -> Result<User, IdentityError> {
        let email = Email::new(email)?;
        let password = Password::new(password)?;
        let name = fields.name.map(DisplayName::new).transpose()?;
        let password_hash = self.hasher.hash(&password)?;

        let user = User::new(UserId::random(), email, name, password_hash).with_flags(UserFlags {
            is_active: fields.is_active,
            is_staff: fields.is_staff,
            is_superuser: fields.is_superuser,
        });
        self.users.create(&user).await?;
        Ok(user)
    }

    /// Create and persist a user with staff and superuser rights.
    ///
    /// # Errors
    /// Fails exactly like [`Self::create_user`].
    pub async fn create_superuser(
        &self,
        email: &str,
        password: &str,
        fields: NewUserFields,
    ) -> Result<User, IdentityError> {
        let fields = NewUserFields {
            is_staff: true,
            is_superuser: true,
            ..fields
        };
        self.create_user(email, password, fields).await
    }
}

#[async_trait]
impl<U, H> UserRegistration for UserFactory<U, H>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error> {
        let RegisterUserRequest {
            email,
            password,
            name,
        } = request;
        let user = self
            .create_user(&email, password.as_str(), NewUserFields::named(name))
            .await?;
        Ok(user.profile())
    }
}

#[cfg(test)]
#[path = "user_factory_tests.rs"]
mod tests;
