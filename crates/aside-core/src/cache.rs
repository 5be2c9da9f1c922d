//! Cache capability.

use async_trait::async_trait;

use crate::error::CacheError;
use crate::key::CacheKey;
use crate::model::User;

/// A key-value cache holding disposable copies of user records.
///
/// Entries never expire on their own; removal happens only through `del`.
///
/// # Implementors
///
/// - `RedisUserCache` - JSON values in Redis through a connection manager
/// - `MokaUserCache` - in-process moka cache, for local runs and tests
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Looks up a cached record.
    ///
    /// Returns `Ok(None)` on a miss. Errors are reserved for transport
    /// failures and undecodable values.
    async fn get(&self, key: &CacheKey) -> Result<Option<User>, CacheError>;

    /// Stores `user` under `key` without expiration, replacing any previous value.
    async fn set(&self, key: &CacheKey, user: &User) -> Result<(), CacheError>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn del(&self, key: &CacheKey) -> Result<(), CacheError>;

    /// Verifies that the cache is reachable.
    async fn health_check(&self) -> Result<(), CacheError> {
        Ok(())
    }

    /// Returns the name of this cache, for logging.
    fn name(&self) -> &str;
}
