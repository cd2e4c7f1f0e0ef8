//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, TokenAuthenticator, UserProfileCommand, UserProfileQuery, UserRegistration,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub registration: Arc<dyn UserRegistration>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenAuthenticator>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_command: Arc<dyn UserProfileCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenAuthenticator>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_command: Arc<dyn UserProfileCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use recipe_backend::domain::ports::FixturePasswordHasher;
    /// use recipe_backend::domain::{ProfileService, TokenIssuer, UserFactory};
    /// use recipe_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use recipe_backend::outbound::memory::{InMemoryTokenRepository, InMemoryUserRepository};
    ///
    /// let users = Arc::new(InMemoryUserRepository::new());
    /// let tokens = Arc::new(InMemoryTokenRepository::new());
    /// let hasher = Arc::new(FixturePasswordHasher);
    /// let issuer = Arc::new(TokenIssuer::new(users.clone(), tokens, hasher.clone()));
    /// let profiles = Arc::new(ProfileService::new(users.clone(), hasher.clone()));
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     registration: Arc::new(UserFactory::new(users, hasher)),
    ///     login: issuer.clone(),
    ///     tokens: issuer,
    ///     profile: profiles.clone(),
    ///     profile_command: profiles,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            registration,
            login,
            tokens,
            profile,
            profile_command,
        } = ports;
        Self {
            registration,
            login,
            tokens,
            profile,
            profile_command,
        }
    }
}
