//! PostgreSQL connection configuration.

use std::time::Duration;

use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use serde::{Deserialize, Serialize};
use tokio_postgres::NoTls;

use crate::error::BackendError;

/// Connection settings for the PostgreSQL store.
///
/// Defaults target a local development database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresConfig {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Role used to connect.
    pub user: String,
    /// Password for `user`.
    pub password: String,
    /// Database name.
    pub name: String,
    /// Maximum number of pooled connections.
    pub pool_size: usize,
    /// Seconds to wait for a connection before failing a request.
    pub connect_timeout_secs: u64,
    /// Create the `users` table at startup if it is missing.
    pub run_migrations: bool,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "password".to_string(),
            name: "users".to_string(),
            pool_size: 16,
            connect_timeout_secs: 30,
            run_migrations: true,
        }
    }
}

impl PostgresConfig {
    /// Returns the pool wait/create timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Create a connection pool from this configuration.
    ///
    /// No connection is opened here; the first one is established lazily.
    pub fn create_pool(&self) -> Result<Pool, BackendError> {
        if self.pool_size == 0 {
            return Err(BackendError::invalid_config(
                "database pool_size must be at least 1",
            ));
        }

        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.name.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let mut pool_config = PoolConfig::new(self.pool_size);
        pool_config.timeouts.wait = Some(self.connect_timeout());
        pool_config.timeouts.create = Some(self.connect_timeout());
        cfg.pool = Some(pool_config);

        Ok(cfg.create_pool(Some(Runtime::Tokio1), NoTls)?)
    }
}
