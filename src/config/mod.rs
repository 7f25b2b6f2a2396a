//! Configuration module.
//!
//! Handles connection configuration, environment variables, and settings.

mod connection;
mod settings;

pub use connection::{ConnectionConfig, ConnectionError, DEFAULT_PORT};
pub use settings::{
    expand_env_vars, ConnectionSettings, OutputSettings, PoolSettings, Settings, SettingsError,
};
