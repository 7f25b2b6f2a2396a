//! TOML-based configuration.
//!
//! Supports a config file (greg.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [connections.default]
//! connection_string = "${GREG_DATABASE_URL}"
//!
//! [connections.test]
//! connection_string = "postgres://greg@localhost/greg_test"
//!
//! [pool]
//! max_connections = 5
//! acquire_timeout = "30s"
//! idle_timeout = "10m"
//!
//! [output]
//! directory = "./rapporter"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Invalid duration format: {0}")]
    InvalidDuration(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Named database connections. The name is what a report's data
    /// source refers to.
    pub connections: BTreeMap<String, ConnectionSettings>,

    /// Connection pool settings, shared by all connections.
    pub pool: PoolSettings,

    /// Where output datasets are written.
    pub output: OutputSettings,
}

/// Connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// Connection URL (supports ${ENV_VAR} expansion).
    pub connection_string: String,
}

impl ConnectionSettings {
    /// Get the connection string with environment variables expanded.
    pub fn resolved_connection_string(&self) -> Result<String, SettingsError> {
        expand_env_vars(&self.connection_string)
    }

    /// Parse the resolved connection string into sqlx connect options.
    pub fn connect_options(&self) -> Result<PgConnectOptions, SettingsError> {
        self.resolved_connection_string()?
            .parse()
            .map_err(|e: sqlx::Error| SettingsError::InvalidConfig(e.to_string()))
    }
}

/// Connection pool settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Maximum number of open connections per pool.
    pub max_connections: u32,

    /// Minimum number of idle connections kept open.
    pub min_connections: u32,

    /// How long to wait for a connection (e.g., "30s").
    pub acquire_timeout: String,

    /// Close connections idle for longer than this (e.g., "10m").
    pub idle_timeout: String,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 0,
            acquire_timeout: "30s".to_string(),
            idle_timeout: "10m".to_string(),
        }
    }
}

impl PoolSettings {
    pub fn acquire_timeout(&self) -> Result<Duration, SettingsError> {
        parse_duration_setting(&self.acquire_timeout)
    }

    pub fn idle_timeout(&self) -> Result<Duration, SettingsError> {
        parse_duration_setting(&self.idle_timeout)
    }

    /// Convert to sqlx pool options.
    pub fn pool_options(&self) -> Result<PgPoolOptions, SettingsError> {
        if self.min_connections > self.max_connections {
            return Err(SettingsError::InvalidConfig(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }

        Ok(PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout()?)
            .idle_timeout(self.idle_timeout()?))
    }
}

fn parse_duration_setting(s: &str) -> Result<Duration, SettingsError> {
    parse_duration::parse(s).map_err(|_| SettingsError::InvalidDuration(s.to_string()))
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory output datasets are written to (supports ${ENV_VAR}).
    pub directory: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}

impl OutputSettings {
    pub fn resolved_directory(&self) -> Result<PathBuf, SettingsError> {
        expand_env_vars(&self.directory).map(PathBuf::from)
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `GREG_CONFIG`
    /// 2. `./greg.toml`
    /// 3. `~/.config/greg/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("GREG_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("greg.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("greg").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    /// Get a connection by name.
    pub fn get_connection(&self, name: &str) -> Result<&ConnectionSettings, SettingsError> {
        self.connections
            .get(name)
            .ok_or_else(|| SettingsError::ConnectionNotFound(name.to_string()))
    }

    /// Get the default connection ("default" if it exists, else the first by name).
    pub fn default_connection(&self) -> Option<(&str, &ConnectionSettings)> {
        if let Some(conn) = self.connections.get("default") {
            return Some(("default", conn));
        }
        self.connections.iter().next().map(|(k, v)| (k.as_str(), v))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut var_name = String::new();
        while let Some(&ch) = chars.peek() {
            if braced {
                chars.next();
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            } else if ch.is_alphanumeric() || ch == '_' {
                var_name.push(ch);
                chars.next();
            } else {
                break;
            }
        }

        if var_name.is_empty() && !braced {
            // Just a lone $, keep it
            result.push('$');
            continue;
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
