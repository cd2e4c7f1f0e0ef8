//! Test utilities shared by unit and integration tests.
//!
//! Compiled for `cfg(test)` and with the `test-support` feature, which the
//! crate's own dev-dependency enables for `tests/`.

use std::sync::Arc;

use crate::domain::ports::FixturePasswordHasher;
use crate::domain::{ProfileService, TokenIssuer, UserFactory};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryTokenRepository, InMemoryUserRepository};

/// In-memory stores plus the services wired over them.
///
/// The store handles stay reachable so tests can seed or inspect state
/// behind the HTTP surface.
pub struct InMemoryIdentity {
    pub users: Arc<InMemoryUserRepository>,
    pub tokens: Arc<InMemoryTokenRepository>,
    pub factory: UserFactory<InMemoryUserRepository, FixturePasswordHasher>,
    pub issuer:
        Arc<TokenIssuer<InMemoryUserRepository, InMemoryTokenRepository, FixturePasswordHasher>>,
    pub profiles: Arc<ProfileService<InMemoryUserRepository, FixturePasswordHasher>>,
}

impl InMemoryIdentity {
    /// Wire fresh, empty stores.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::test_support::InMemoryIdentity;
    ///
    /// let identity = InMemoryIdentity::new();
    /// assert!(identity.users.is_empty());
    /// ```
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(InMemoryTokenRepository::new());
        let hasher = Arc::new(FixturePasswordHasher);
        Self {
            factory: UserFactory::new(Arc::clone(&users), Arc::clone(&hasher)),
            issuer: Arc::new(TokenIssuer::new(
                Arc::clone(&users),
                Arc::clone(&tokens),
                Arc::clone(&hasher),
            )),
            profiles: Arc::new(ProfileService::new(Arc::clone(&users), hasher)),
            users,
            tokens,
        }
    }

    /// HTTP state backed by these stores.
    pub fn http_state(&self) -> HttpState {
        HttpState::new(HttpStatePorts {
            registration: Arc::new(self.factory.clone()),
            login: self.issuer.clone(),
            tokens: self.issuer.clone(),
            profile: self.profiles.clone(),
            profile_command: self.profiles.clone(),
        })
    }
}

impl Default for InMemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}
