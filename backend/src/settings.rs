//! Server configuration loaded via OrthoConfig.
//!
//! Values are layered from defaults, configuration files, `RECIPE_*`
//! environment variables and command-line flags.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Address the HTTP server binds to when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Pool size used when none is configured.
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address {value}: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// The pool must allow at least one connection.
    #[error("database pool size must be at least 1")]
    EmptyPool,
}

/// Runtime settings for the API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPE")]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without it the server keeps state in memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply pending migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Parsed bind address, falling back to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Whether to apply pending migrations at startup, unless disabled.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool size, falling back to [`DEFAULT_POOL_MAX_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptyPool`] when configured as zero.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size {
            Some(0) => Err(SettingsError::EmptyPool),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_POOL_MAX_SIZE),
        }
    }
}
