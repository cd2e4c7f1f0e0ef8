//! Driving port for profile self-service updates.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{Error, UserId, UserProfile};

/// Partial profile update. `None` leaves the field unchanged.
#[derive(Clone, Default)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email; re-normalised and re-checked for uniqueness.
    pub email: Option<String>,
    /// New plaintext password; re-validated and re-hashed.
    pub password: Option<Zeroizing<String>>,
}

impl UpdateProfileRequest {
    /// Whether the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

impl std::fmt::Debug for UpdateProfileRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateProfileRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Domain use-case port for updating the current user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Apply a partial update and return the resulting profile.
    async fn update_profile(
        &self,
        user_id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile, Error>;
}
