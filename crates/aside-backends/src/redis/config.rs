//! Redis connection configuration.

use aside_core::CacheKey;
use serde::{Deserialize, Serialize};

use super::cache::namespaced_key;

/// Connection settings for the Redis cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis host.
    pub host: String,
    /// Redis port.
    pub port: u16,
    /// Password (`AUTH`); empty disables authentication.
    pub password: String,
    /// Logical database index.
    pub db: i64,
    /// Prefix reserved for user entries so they do not collide with other
    /// keys in the same database.
    pub key_prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            password: "redispassword".to_string(),
            db: 0,
            key_prefix: "users:".to_string(),
        }
    }
}

impl RedisConfig {
    /// Builds the `redis://` connection URL, percent-encoding the password.
    ///
    /// # Examples
    ///
    /// ```
    /// use aside_backends::RedisConfig;
    ///
    /// let config = RedisConfig {
    ///     password: "p@ss".to_string(),
    ///     ..RedisConfig::default()
    /// };
    /// assert_eq!(config.url(), "redis://:p%40ss@localhost:6379/0");
    /// ```
    pub fn url(&self) -> String {
        if self.password.is_empty() {
            format!("redis://{}:{}/{}", self.host, self.port, self.db)
        } else {
            format!(
                "redis://:{}@{}:{}/{}",
                urlencoding::encode(&self.password),
                self.host,
                self.port,
                self.db
            )
        }
    }

    /// Redis key a cache built from this configuration uses for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aside_backends::RedisConfig;
    /// use aside_core::{CacheKey, UserId};
    ///
    /// let key = CacheKey::new(UserId::new(7).unwrap());
    /// assert_eq!(RedisConfig::default().key_for(&key), "users:7");
    /// ```
    pub fn key_for(&self, key: &CacheKey) -> String {
        namespaced_key(&self.key_prefix, key)
    }

    /// Same as [`url`](Self::url) with the password masked, for logs.
    pub fn redacted_url(&self) -> String {
        if self.password.is_empty() {
            self.url()
        } else {
            format!("redis://:***@{}:{}/{}", self.host, self.port, self.db)
        }
    }
}
