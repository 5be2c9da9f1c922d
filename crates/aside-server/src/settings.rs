//! Layered settings: built-in defaults, an optional file, then environment.
//!
//! Environment keys use the `ASIDE_` prefix and `__` between sections, so
//! `ASIDE_DATABASE__HOST=db` sets `database.host` and
//! `ASIDE_CACHE__ON_POPULATE_FAILURE=fail` sets the populate policy.

use std::net::{IpAddr, SocketAddr};

use aside_backends::{PostgresConfig, RedisConfig};
use aside_core::CachePolicy;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the settings file (without extension).
pub const CONFIG_PATH_ENV: &str = "ASIDE_CONFIG";

/// Settings file looked up when `ASIDE_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/aside";

const ENV_PREFIX: &str = "ASIDE";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid listen address '{host}:{port}'")]
    InvalidAddress { host: String, port: u16 },
}

/// Which adapters back the coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// PostgreSQL store and Redis cache.
    #[default]
    Live,
    /// In-process store and moka cache. Data is lost on exit.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    /// Resolves the listen address.
    pub fn addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| SettingsError::InvalidAddress {
                host: self.host.clone(),
                port: self.port,
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Complete server settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendMode,
    pub server: ServerSettings,
    pub database: PostgresConfig,
    pub redis: RedisConfig,
    pub cache: CachePolicy,
}

impl Settings {
    /// Loads settings from the file named by `ASIDE_CONFIG` (if present) and
    /// the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::build(File::with_name(&path).required(false))
    }

    /// Loads settings from an in-memory document plus the environment.
    pub fn from_document(contents: &str, format: FileFormat) -> Result<Self, SettingsError> {
        Self::build(File::from_str(contents, format))
    }

    fn build<S>(file: S) -> Result<Self, SettingsError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
