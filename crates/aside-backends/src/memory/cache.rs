//! In-process `UserCache` using Moka.

use std::sync::Arc;

use async_trait::async_trait;
use aside_core::{CacheError, CacheKey, User, UserCache};
use moka::future::Cache;
use tracing::debug;

/// Unbounded in-process cache of user records.
///
/// Built without capacity, TTL or TTI: entries stay until `del` is called.
/// Thread-safe y async-friendly; clones share the same entries.
#[derive(Clone)]
pub struct MokaUserCache {
    inner: Cache<CacheKey, Arc<User>>,
}

impl MokaUserCache {
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    /// Retorna el numero aproximado de entries en cache.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Sincroniza el cache (para tests principalmente).
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }
}

impl Default for MokaUserCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserCache for MokaUserCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<User>, CacheError> {
        let hit = self.inner.get(key).await;
        debug!(key = %key, hit = hit.is_some(), "Cache lookup");
        Ok(hit.map(|user| user.as_ref().clone()))
    }

    async fn set(&self, key: &CacheKey, user: &User) -> Result<(), CacheError> {
        self.inner.insert(*key, Arc::new(user.clone())).await;
        Ok(())
    }

    async fn del(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    fn name(&self) -> &str {
        "moka"
    }
}
