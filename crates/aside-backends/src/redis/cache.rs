//! Redis implementation of `UserCache`.

use ::redis::aio::ConnectionManager;
use ::redis::{AsyncCommands, Client};
use async_trait::async_trait;
use aside_core::{CacheError, CacheKey, User, UserCache};
use tracing::{debug, info};

use super::config::RedisConfig;
use crate::error::BackendError;

/// User cache backed by Redis.
///
/// Values are the JSON form of [`User`], stored without expiration under
/// `<key_prefix><id>`. The connection manager reconnects on its own after
/// transport failures; each call clones the (cheap) manager handle.
#[derive(Clone)]
pub struct RedisUserCache {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisUserCache {
    /// Wraps an established connection manager.
    pub fn new(conn: ConnectionManager, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Connects to Redis using the given configuration.
    pub async fn connect(config: &RedisConfig) -> Result<Self, BackendError> {
        let client = Client::open(config.url())?;
        let conn = ConnectionManager::new(client).await?;

        info!(url = %config.redacted_url(), "Connected to Redis");
        Ok(Self::new(conn, config.key_prefix.clone()))
    }

    /// Returns the namespaced Redis key for a cache key.
    pub fn redis_key(&self, key: &CacheKey) -> String {
        namespaced_key(&self.key_prefix, key)
    }
}

/// `<prefix><id>`, the layout of every user entry.
pub(crate) fn namespaced_key(prefix: &str, key: &CacheKey) -> String {
    key.prefixed(prefix)
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<User>, CacheError> {
        let redis_key = self.redis_key(key);
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(&redis_key)
            .await
            .map_err(|e| CacheError::transport_with_cause(format!("GET {} failed", redis_key), e))?;

        match raw {
            None => {
                debug!(key = %redis_key, "Cache MISS");
                Ok(None)
            },
            Some(json) => {
                let user = serde_json::from_str(&json).map_err(|e| {
                    CacheError::serialization(format!("undecodable value at {}", redis_key), e)
                })?;
                debug!(key = %redis_key, "Cache HIT");
                Ok(Some(user))
            },
        }
    }

    async fn set(&self, key: &CacheKey, user: &User) -> Result<(), CacheError> {
        let redis_key = self.redis_key(key);
        let json = serde_json::to_string(user)
            .map_err(|e| CacheError::serialization("failed to encode user", e))?;
        let mut conn = self.conn.clone();

        let _: () = conn
            .set(&redis_key, json)
            .await
            .map_err(|e| CacheError::transport_with_cause(format!("SET {} failed", redis_key), e))?;

        debug!(key = %redis_key, "User stored in cache");
        Ok(())
    }

    async fn del(&self, key: &CacheKey) -> Result<(), CacheError> {
        let redis_key = self.redis_key(key);
        let mut conn = self.conn.clone();

        let removed: i64 = conn
            .del(&redis_key)
            .await
            .map_err(|e| CacheError::transport_with_cause(format!("DEL {} failed", redis_key), e))?;

        if removed == 0 {
            debug!(key = %redis_key, "Key was not cached");
        } else {
            debug!(key = %redis_key, "User deleted from cache");
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: String = ::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::transport_with_cause("PING failed", e))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "redis"
    }
}
