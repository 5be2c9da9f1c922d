//! Adapter wrappers for failure injection and call counting.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use aside_backends::{MemoryUserStore, MokaUserCache};
use aside_core::{
    CacheError, CacheKey, StoreError, User, UserCache, UserFields, UserId, UserStore,
};

/// In-memory store that counts reads and can be switched off.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryUserStore,
    pub reads: AtomicUsize,
    pub down: AtomicBool,
}

impl CountingStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::backend("database unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn create(&self, fields: &UserFields) -> Result<User, StoreError> {
        self.check()?;
        self.inner.create(fields).await
    }

    async fn get(&self, id: UserId) -> Result<User, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.get(id).await
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.get_all().await
    }

    async fn update(&self, id: UserId, fields: &UserFields) -> Result<User, StoreError> {
        self.check()?;
        self.inner.update(id, fields).await
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete(id).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check()
    }

    fn name(&self) -> &str {
        "counting-memory"
    }
}

/// Moka cache whose writes can be made to fail.
#[derive(Default)]
pub struct FlakyCache {
    inner: MokaUserCache,
    pub writes_fail: AtomicBool,
    pub down: AtomicBool,
}

impl FlakyCache {
    fn check(&self, flag: &AtomicBool) -> Result<(), CacheError> {
        if flag.load(Ordering::SeqCst) {
            return Err(CacheError::transport("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserCache for FlakyCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<User>, CacheError> {
        self.check(&self.down)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &CacheKey, user: &User) -> Result<(), CacheError> {
        self.check(&self.down)?;
        self.check(&self.writes_fail)?;
        self.inner.set(key, user).await
    }

    async fn del(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.check(&self.down)?;
        self.check(&self.writes_fail)?;
        self.inner.del(key).await
    }

    async fn health_check(&self) -> Result<(), CacheError> {
        self.check(&self.down)
    }

    fn name(&self) -> &str {
        "flaky-moka"
    }
}
