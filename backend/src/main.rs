//! Backend entry-point: loads settings, wires storage and serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_backend::inbound::http::health::HealthState;
use recipe_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use recipe_backend::outbound::security::Argon2PasswordHasher;
use recipe_backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr);

    match settings.database_url() {
        Some(database_url) => {
            if settings.run_migrations() {
                run_pending_migrations(database_url)
                    .await
                    .map_err(|e| std::io::Error::other(format!("apply migrations: {e}")))?;
            }
            let pool_config = PoolConfig::new(database_url)
                .with_max_size(settings.pool_max_size().map_err(std::io::Error::other)?);
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|e| std::io::Error::other(format!("create database pool: {e}")))?;
            config = config.with_db_pool(pool);
        }
        None => {
            warn!("no database URL configured; accounts are kept in memory only");
        }
    }

    let hasher = Argon2PasswordHasher::new()
        .map_err(|e| std::io::Error::other(format!("initialise password hasher: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, Arc::new(hasher))?;
    info!(%bind_addr, "listening");
    server.await
}
