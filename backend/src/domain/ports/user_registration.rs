//! Driving port for self-service account registration.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{Error, UserProfile};

/// Raw registration input handed over by inbound adapters.
///
/// Values are validated by the service so every adapter shares one policy.
#[derive(Clone)]
pub struct RegisterUserRequest {
    /// Email as typed by the user.
    pub email: String,
    /// Plaintext password; zeroed on drop.
    pub password: Zeroizing<String>,
    /// Display name.
    pub name: String,
}

impl std::fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create an active, non-staff account and return its public projection.
    async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, Error>;
}
