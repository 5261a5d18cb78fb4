use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgSslMode;
use todo_core::retry::{RetryPolicy, DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS};
use todo_db::config::DbConfig;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unsupported database dialect '{0}' (only 'postgres' is supported)")]
    UnsupportedDialect(String),
}

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Database connection parameters.
    pub database: DbConfig,
    /// Startup connection retry (default: 5 attempts, 5 s apart).
    pub connect_retry: RetryPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec![HeaderValue::from_static(DEFAULT_CORS_ORIGIN)],
            request_timeout_secs: 30,
            database: DbConfig::default(),
            connect_retry: RetryPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                    |
    /// |-------------------------------|----------------------------|
    /// | `HOST`                        | `0.0.0.0`                  |
    /// | `PORT`                        | `3000`                     |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                       |
    /// | `DATABASE_URL`                | unset (overrides `DB_*`)   |
    /// | `DB_DIALECT`                  | `postgres`                 |
    /// | `DB_HOST`                     | `localhost`                |
    /// | `DB_PORT`                     | `5432`                     |
    /// | `DB_NAME`                     | `todoapp`                  |
    /// | `DB_USER`                     | `postgres`                 |
    /// | `DB_PASSWORD`                 | empty                      |
    /// | `DB_SSLMODE`                  | `disable`                  |
    /// | `DB_MAX_CONNECTIONS`          | `20`                       |
    /// | `DB_CONNECT_ATTEMPTS`         | `5`                        |
    /// | `DB_CONNECT_RETRY_DELAY_SECS` | `5`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DbConfig::default();

        let dialect = lookup("DB_DIALECT").unwrap_or_else(|| "postgres".into());
        if !matches!(dialect.as_str(), "postgres" | "postgresql") {
            return Err(ConfigError::UnsupportedDialect(dialect));
        }

        let database = DbConfig {
            url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "DB_PORT", defaults.port)?,
            database: lookup("DB_NAME").unwrap_or(defaults.database),
            username: lookup("DB_USER").unwrap_or(defaults.username),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            ssl_mode: parse_var::<PgSslMode, _>(&lookup, "DB_SSLMODE", defaults.ssl_mode)?,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
        };

        if let (Some(url), Err(e)) = (&database.url, database.connect_options()) {
            return Err(ConfigError::Invalid {
                var: "DATABASE_URL",
                value: url.clone(),
                reason: e.to_string(),
            });
        }

        let connect_retry = RetryPolicy::new(
            parse_var(&lookup, "DB_CONNECT_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
            Duration::from_secs(parse_var(
                &lookup,
                "DB_CONNECT_RETRY_DELAY_SECS",
                DEFAULT_DELAY.as_secs(),
            )?),
        );

        let cors_origins = match lookup("CORS_ORIGINS") {
            None => vec![HeaderValue::from_static(DEFAULT_CORS_ORIGIN)],
            Some(raw) => parse_origins(&raw)?,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_var(&lookup, "PORT", 3000)?,
            cors_origins,
            request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            database,
            connect_retry,
        })
    }
}

/// Split comma-separated `CORS_ORIGINS` into header values, skipping blanks.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: origin.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Parse `var` with `FromStr`, falling back to `default` when unset.
fn parse_var<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
