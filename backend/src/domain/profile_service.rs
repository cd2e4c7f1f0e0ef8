//! Profile self-service for authenticated users.
//!
//! Updates re-run the same validation as registration. The caller's session
//! token stays valid after a password change.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    PasswordHasher, UpdateProfileRequest, UserProfileCommand, UserProfileQuery, UserRepository,
};
use crate::domain::{
    DisplayName, Email, Error, IdentityError, Password, User, UserId, UserProfile,
};

/// Reads and updates the caller's own identity record.
pub struct ProfileService<U: ?Sized, H: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U: ?Sized, H: ?Sized> Clone for ProfileService<U, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<U, H> ProfileService<U, H>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    /// Create a service over the given store and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }

    /// Load the caller's record.
    ///
    /// # Errors
    /// [`IdentityError::Unauthorized`] when the record no longer exists.
    pub async fn current_user(&self, user_id: &UserId) -> Result<User, IdentityError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityError::Unauthorized)
    }

    /// Apply a partial update to the caller's record.
    ///
    /// Every supplied field is validated before anything is hashed or
    /// written; omitted fields are left untouched.
    ///
    /// # Errors
    /// - [`IdentityError::InvalidIdentity`] for a blank name, malformed email
    ///   or short password.
    /// - [`IdentityError::DuplicateIdentity`] when the new email is taken.
    pub async fn update(
        &self,
        user_id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, IdentityError> {
        let current = self.current_user(user_id).await?;
        if request.is_empty() {
            return Ok(current);
        }

        let UpdateProfileRequest {
            name,
            email,
            password,
        } = request;
        let name = name.map(DisplayName::new).transpose()?;
        let email = email.map(Email::new).transpose()?;
        let password = password
            .map(|raw| Password::new(raw.as_str()))
            .transpose()?;

        let mut updated = current;
        if let Some(name) = name {
            updated = updated.with_name(name);
        }
        if let Some(email) = email {
            updated = updated.with_email(email);
        }
        if let Some(password) = password {
            updated = updated.with_password_hash(self.hasher.hash(&password)?);
        }

        self.users.update(&updated).await?;
        Ok(updated)
    }
}

#[async_trait]
impl<U, H> UserProfileQuery for ProfileService<U, H>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        Ok(self.current_user(user_id).await?.profile())
    }
}

#[async_trait]
impl<U, H> UserProfileCommand for ProfileService<U, H>
where
    U: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn update_profile(
        &self,
        user_id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile, Error> {
        Ok(self.update(user_id, request).await?.profile())
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
