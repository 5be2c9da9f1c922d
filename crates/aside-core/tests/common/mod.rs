#![allow(dead_code)]
//! Call-counting doubles for the store and cache traits.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use aside_core::{
    CacheError, CacheKey, CachePolicy, StoreError, User, UserCache, UserFields, UserId,
    UserService, UserStore,
};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

/// Per-operation call counters.
#[derive(Debug, Default)]
pub struct Calls {
    pub create: AtomicUsize,
    pub get: AtomicUsize,
    pub get_all: AtomicUsize,
    pub update: AtomicUsize,
    pub delete: AtomicUsize,
    pub set: AtomicUsize,
    pub del: AtomicUsize,
}

impl Calls {
    pub fn total(&self) -> usize {
        [
            &self.create,
            &self.get,
            &self.get_all,
            &self.update,
            &self.delete,
            &self.set,
            &self.del,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

/// Store double: soft-deletes like the real store and counts every call.
#[derive(Default)]
pub struct CountingStore {
    rows: Mutex<BTreeMap<i64, User>>,
    next_id: AtomicUsize,
    pub calls: Calls,
    pub fail: AtomicBool,
    /// Shared log of adapter calls in order, for ordering assertions.
    pub journal: Option<Arc<Mutex<Vec<&'static str>>>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(journal: Arc<Mutex<Vec<&'static str>>>) -> Self {
        Self {
            journal: Some(journal),
            ..Self::default()
        }
    }

    /// Inserts a row directly, bypassing the counters.
    pub fn seed(&self, name: &str) -> User {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let now = Utc::now();
        let user = User {
            id: UserId::new(id).unwrap(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            name: name.to_string(),
        };
        self.rows.lock().insert(id, user.clone());
        user
    }

    pub fn row(&self, id: UserId) -> Option<User> {
        self.rows.lock().get(&id.get()).cloned()
    }

    fn note(&self, op: &'static str) {
        if let Some(journal) = &self.journal {
            journal.lock().push(op);
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::backend("injected store failure"));
        }
        Ok(())
    }

    fn visible(&self, id: UserId) -> Result<User, StoreError> {
        self.rows
            .lock()
            .get(&id.get())
            .filter(|u| !u.is_deleted())
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn create(&self, fields: &UserFields) -> Result<User, StoreError> {
        bump(&self.calls.create);
        self.note("store.create");
        self.check()?;
        Ok(self.seed(fields.name()))
    }

    async fn get(&self, id: UserId) -> Result<User, StoreError> {
        bump(&self.calls.get);
        self.note("store.get");
        self.check()?;
        self.visible(id)
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        bump(&self.calls.get_all);
        self.note("store.get_all");
        self.check()?;
        Ok(self
            .rows
            .lock()
            .values()
            .filter(|u| !u.is_deleted())
            .cloned()
            .collect())
    }

    async fn update(&self, id: UserId, fields: &UserFields) -> Result<User, StoreError> {
        bump(&self.calls.update);
        self.note("store.update");
        self.check()?;
        self.visible(id)?;
        let mut rows = self.rows.lock();
        let row = rows.get_mut(&id.get()).ok_or(StoreError::NotFound(id))?;
        row.name = fields.name().to_string();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        bump(&self.calls.delete);
        self.note("store.delete");
        self.check()?;
        self.visible(id)?;
        if let Some(row) = self.rows.lock().get_mut(&id.get()) {
            row.deleted_at = Some(Utc::now());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "counting-store"
    }
}

/// Cache double with independent failure switches for reads and writes.
#[derive(Default)]
pub struct CountingCache {
    entries: Mutex<HashMap<CacheKey, User>>,
    pub calls: Calls,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    pub fail_del: AtomicBool,
    pub journal: Option<Arc<Mutex<Vec<&'static str>>>>,
}

impl CountingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(journal: Arc<Mutex<Vec<&'static str>>>) -> Self {
        Self {
            journal: Some(journal),
            ..Self::default()
        }
    }

    /// Reads an entry directly, bypassing the counters.
    pub fn peek(&self, id: UserId) -> Option<User> {
        self.entries.lock().get(&CacheKey::new(id)).cloned()
    }

    /// Writes an entry directly, bypassing the counters.
    pub fn put(&self, user: &User) {
        self.entries
            .lock()
            .insert(CacheKey::new(user.id), user.clone());
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn note(&self, op: &'static str) {
        if let Some(journal) = &self.journal {
            journal.lock().push(op);
        }
    }
}

#[async_trait]
impl UserCache for CountingCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<User>, CacheError> {
        bump(&self.calls.get);
        self.note("cache.get");
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(CacheError::transport("injected cache read failure"));
        }
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &CacheKey, user: &User) -> Result<(), CacheError> {
        bump(&self.calls.set);
        self.note("cache.set");
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(CacheError::transport("injected cache write failure"));
        }
        self.entries.lock().insert(*key, user.clone());
        Ok(())
    }

    async fn del(&self, key: &CacheKey) -> Result<(), CacheError> {
        bump(&self.calls.del);
        self.note("cache.del");
        if self.fail_del.load(Ordering::SeqCst) {
            return Err(CacheError::transport("injected cache delete failure"));
        }
        self.entries.lock().remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "counting-cache"
    }
}

/// Service wired to fresh doubles, with handles kept for assertions.
pub struct Harness {
    pub store: Arc<CountingStore>,
    pub cache: Arc<CountingCache>,
    pub service: UserService,
}

pub fn harness() -> Harness {
    harness_with_policy(CachePolicy::default())
}

pub fn harness_with_policy(policy: CachePolicy) -> Harness {
    let store = Arc::new(CountingStore::new());
    let cache = Arc::new(CountingCache::new());
    let service = UserService::new(store.clone(), cache.clone(), policy);
    Harness {
        store,
        cache,
        service,
    }
}

pub fn load(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

pub fn trip(flag: &AtomicBool) {
    flag.store(true, Ordering::SeqCst);
}
