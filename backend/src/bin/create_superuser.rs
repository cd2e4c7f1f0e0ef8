//! Create an administrative superuser in the configured database.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::sync::Arc;

use clap::Parser;
use tokio::runtime::Builder;
use zeroize::Zeroizing;

use recipe_backend::domain::{NewUserFields, UserFactory};
use recipe_backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use recipe_backend::outbound::security::Argon2PasswordHasher;

const PASSWORD_ENV: &str = "SUPERUSER_PASSWORD";
const DATABASE_URL_ENVS: [&str; 2] = ["RECIPE_DATABASE_URL", "DATABASE_URL"];

/// `create-superuser` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "create-superuser",
    about = "Create a staff superuser account",
    version
)]
struct CliArgs {
    /// Email address; the domain part is lowercased.
    #[arg(long, value_name = "email")]
    email: String,
    /// Optional display name.
    #[arg(long, value_name = "name")]
    name: Option<String>,
    /// Password. Falls back to `SUPERUSER_PASSWORD` when omitted.
    #[arg(long, value_name = "password")]
    password: Option<String>,
    /// Database connection URL. Falls back to `RECIPE_DATABASE_URL`, then
    /// `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let password = resolve_password(args.password, env::var(PASSWORD_ENV).ok())?;
    let database_url = resolve_database_url(
        args.database_url,
        DATABASE_URL_ENVS.iter().filter_map(|name| env::var(name).ok()),
    )?;

    run_pending_migrations(&database_url)
        .await
        .map_err(|error| io::Error::other(format!("apply migrations: {error}")))?;
    let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(1).with_min_idle(None))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let hasher = Argon2PasswordHasher::new()
        .map_err(|error| io::Error::other(format!("initialise password hasher: {error}")))?;
    let factory = UserFactory::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(hasher),
    );

    let fields = NewUserFields {
        name: args.name,
        ..NewUserFields::default()
    };
    let user = factory
        .create_superuser(&args.email, &password, fields)
        .await
        .map_err(|error| io::Error::other(format!("create superuser: {error}")))?;

    println!("id={}", user.id());
    println!("email={}", user.email());
    Ok(())
}

fn resolve_password(
    explicit: Option<String>,
    from_env: Option<String>,
) -> io::Result<Zeroizing<String>> {
    explicit
        .or(from_env)
        .map(Zeroizing::new)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("password missing: set --password or {PASSWORD_ENV}"),
            )
        })
}

fn resolve_database_url(
    explicit: Option<String>,
    from_env: impl IntoIterator<Item = String>,
) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    from_env
        .into_iter()
        .find(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "database URL missing: set --database-url, RECIPE_DATABASE_URL or DATABASE_URL",
            )
        })
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use rstest::rstest;

    use super::{CliArgs, resolve_database_url, resolve_password};
    use clap::Parser;

    #[rstest]
    fn explicit_password_wins_over_environment() {
        let password = resolve_password(Some("cli-pass".into()), Some("env-pass".into()))
            .expect("password resolves");
        assert_eq!(password.as_str(), "cli-pass");
    }

    #[rstest]
    fn environment_password_is_used_as_fallback() {
        let password =
            resolve_password(None, Some("env-pass".into())).expect("password resolves");
        assert_eq!(password.as_str(), "env-pass");
    }

    #[rstest]
    fn missing_password_is_rejected() {
        let error = resolve_password(None, None).expect_err("missing password");
        assert!(error.to_string().contains("SUPERUSER_PASSWORD"));
    }

    #[rstest]
    fn blank_database_urls_are_skipped() {
        let url = resolve_database_url(
            None,
            ["  ".to_owned(), "postgres://localhost/recipes".to_owned()],
        )
        .expect("url resolves");
        assert_eq!(url, "postgres://localhost/recipes");
    }

    #[rstest]
    fn blank_explicit_database_url_is_rejected() {
        let error = resolve_database_url(Some(" ".into()), Vec::new()).expect_err("blank url");
        assert!(error.to_string().contains("--database-url"));
    }

    #[rstest]
    fn arguments_parse() {
        let args = CliArgs::try_parse_from([
            "create-superuser",
            "--email",
            "admin@Example.com",
            "--name",
            "Admin",
        ])
        .expect("arguments parse");
        assert_eq!(args.email, "admin@Example.com");
        assert_eq!(args.name.as_deref(), Some("Admin"));
        assert!(args.password.is_none());
    }
}
