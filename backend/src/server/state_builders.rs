//! Builders for HTTP state ports over the configured repositories.

use std::sync::Arc;

use actix_web::web;

use recipe_backend::domain::ports::{PasswordHasher, TokenRepository, UserRepository};
use recipe_backend::domain::{ProfileService, TokenIssuer, UserFactory};
use recipe_backend::inbound::http::state::{HttpState, HttpStatePorts};
use recipe_backend::outbound::memory::{InMemoryTokenRepository, InMemoryUserRepository};
use recipe_backend::outbound::persistence::{DieselTokenRepository, DieselUserRepository};

use super::ServerConfig;

/// Wire the identity services over one user store and one token store.
///
/// Every driving port shares the same stores, so an account created through
/// registration is immediately visible to login and profile lookups.
fn identity_ports<U, T>(
    users: Arc<U>,
    tokens: Arc<T>,
    hasher: Arc<dyn PasswordHasher>,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let issuer = Arc::new(TokenIssuer::new(
        Arc::clone(&users),
        tokens,
        Arc::clone(&hasher),
    ));
    let profiles = Arc::new(ProfileService::new(Arc::clone(&users), Arc::clone(&hasher)));
    HttpStatePorts {
        registration: Arc::new(UserFactory::new(users, hasher)),
        login: issuer.clone(),
        tokens: issuer,
        profile: profiles.clone(),
        profile_command: profiles,
    }
}

/// Build the shared HTTP state.
///
/// Uses the Diesel repositories when a pool is configured, otherwise fresh
/// in-memory stores that live as long as the process.
pub(super) fn build_http_state(
    config: &ServerConfig,
    hasher: Arc<dyn PasswordHasher>,
) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => identity_ports(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselTokenRepository::new(pool.clone())),
            hasher,
        ),
        None => identity_ports(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryTokenRepository::new()),
            hasher,
        ),
    };
    web::Data::new(HttpState::new(ports))
}
