//! Database connection configuration.
//!
//! Supports configuration via environment variables:
//! - `GREG_DATABASE_URL`: full `postgres://` URL (takes precedence)
//! - `GREG_DB_HOST`: Database server hostname
//! - `GREG_DB_NAME`: Database name
//! - `GREG_DB_PORT`: Port (optional, defaults to 5432)
//! - `GREG_DB_USER` / `GREG_DB_PASSWORD`: credentials (optional)

use std::env;

use sqlx::postgres::PgConnectOptions;

/// Default PostgreSQL port.
pub const DEFAULT_PORT: u16 = 5432;

/// Error type for connection configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Database connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Full connection URL; when set, the other fields are ignored.
    pub url: Option<String>,
    /// Server hostname.
    pub host: String,
    /// Database name.
    pub database: String,
    /// Port (optional).
    pub port: Option<u16>,
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
}

impl ConnectionConfig {
    /// Create a new connection config for a host and database.
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: None,
            host: host.into(),
            database: database.into(),
            port: None,
            username: None,
            password: None,
        }
    }

    /// Create a connection config from a `postgres://` URL.
    pub fn from_url(url: impl Into<String>) -> Result<Self, ConnectionError> {
        let url = url.into();
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return Err(ConnectionError::InvalidConfig(
                "connection URL must start with postgres:// or postgresql://".to_string(),
            ));
        }
        url.parse::<PgConnectOptions>()
            .map_err(|e| ConnectionError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            url: Some(url),
            ..Self::new("", "")
        })
    }

    /// Load configuration from environment variables.
    ///
    /// `GREG_DATABASE_URL` wins if set. Otherwise `GREG_DB_HOST` and
    /// `GREG_DB_NAME` are required.
    pub fn from_env() -> Result<Self, ConnectionError> {
        if let Ok(url) = env::var("GREG_DATABASE_URL") {
            return Self::from_url(url);
        }

        let host = env::var("GREG_DB_HOST")
            .map_err(|_| ConnectionError::MissingEnvVar("GREG_DB_HOST".to_string()))?;

        let database = env::var("GREG_DB_NAME")
            .map_err(|_| ConnectionError::MissingEnvVar("GREG_DB_NAME".to_string()))?;

        let port = match env::var("GREG_DB_PORT") {
            Ok(p) => Some(p.parse().map_err(|_| {
                ConnectionError::InvalidConfig(format!("GREG_DB_PORT is not a port: {}", p))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            url: None,
            host,
            database,
            port,
            username: env::var("GREG_DB_USER").ok(),
            password: env::var("GREG_DB_PASSWORD").ok(),
        })
    }

    /// Build sqlx connect options.
    pub fn connect_options(&self) -> PgConnectOptions {
        if let Some(options) = self.url.as_deref().and_then(|u| u.parse().ok()) {
            return options;
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port.unwrap_or(DEFAULT_PORT))
            .database(&self.database);

        if let Some(user) = &self.username {
            options = options.username(user);
        }
        if let Some(pass) = &self.password {
            options = options.password(pass);
        }
        options
    }

    /// Connection description safe for logs (no password).
    pub fn redacted(&self) -> String {
        if self.url.is_some() {
            let options = self.connect_options();
            return format!(
                "postgres://{}:{}/{}",
                options.get_host(),
                options.get_port(),
                options.get_database().unwrap_or_default()
            );
        }

        let user = self
            .username
            .as_deref()
            .map(|u| format!("{}@", u))
            .unwrap_or_default();
        format!(
            "postgres://{}{}:{}/{}",
            user,
            self.host,
            self.port.unwrap_or(DEFAULT_PORT),
            self.database
        )
    }
}
