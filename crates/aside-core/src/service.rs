//! Cache-aside coordination between the durable store and the cache.
//!
//! [`UserService`] is the only place where both adapters meet. Every call is
//! a self-contained protocol:
//!
//! - **read**: cache first; on a miss, store then populate the cache.
//! - **update**: store first; on success overwrite the cache entry.
//! - **delete**: store first; on success remove the cache entry.
//! - **create** and **list** go to the store only (create may populate the
//!   cache when [`CachePolicy::populate_on_create`] is set).
//!
//! For update and delete the store mutation always completes before the cache
//! is touched, so the only possible disagreement is "store updated, cache
//! stale or absent", never the reverse.
//!
//! # Concurrency
//!
//! The service keeps no mutable state and takes no locks. Two concurrent
//! updates of the same id each run `store.update` then `cache.set`; the store
//! orders the writes, but the cache writes may land in either order. The
//! cache can therefore end up holding the value of the store write that
//! committed *first* until the next update or delete of that id. There is no
//! per-id serialization to close this window.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::cache::UserCache;
use crate::error::{CacheError, ServiceError};
use crate::key::CacheKey;
use crate::model::{User, UserId, UserPayload};
use crate::store::UserStore;

/// What to do when populating the cache fails after a successful store read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum PopulateFailure {
    /// Log a warning and return the record read from the store.
    #[default]
    #[serde(rename = "log")]
    LogAndContinue,

    /// Fail the request with [`ServiceError::Inconsistent`].
    #[serde(rename = "fail")]
    Fail,
}

/// Cache population policy of the coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    /// Cache the stored record right after create instead of on first read.
    pub populate_on_create: bool,

    /// Handling of a failed cache write that only populates (read, create).
    pub on_populate_failure: PopulateFailure,
}

/// Result of listing users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// No visible records.
    Empty,
    /// At least one visible record.
    Users(Vec<User>),
}

impl From<Vec<User>> for Listing {
    fn from(users: Vec<User>) -> Self {
        if users.is_empty() {
            Self::Empty
        } else {
            Self::Users(users)
        }
    }
}

/// Coordinator implementing the cache-aside policy.
///
/// # Examples
///
/// ```ignore
/// use std::sync::Arc;
/// use aside_core::{CachePolicy, UserPayload, UserService};
///
/// let service = UserService::new(Arc::new(store), Arc::new(cache), CachePolicy::default());
///
/// let created = service.create(UserPayload::new("Alice")).await?;
/// let fetched = service.read(&created.id.to_string()).await?;
/// assert_eq!(fetched.name, "Alice");
/// ```
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    cache: Arc<dyn UserCache>,
    policy: CachePolicy,
}

impl UserService {
    /// Creates a coordinator over the given adapters.
    pub fn new(store: Arc<dyn UserStore>, cache: Arc<dyn UserCache>, policy: CachePolicy) -> Self {
        Self {
            store,
            cache,
            policy,
        }
    }

    /// Returns the durable store.
    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    /// Returns the cache.
    pub fn cache(&self) -> &dyn UserCache {
        self.cache.as_ref()
    }

    /// Returns the active policy.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Creates a user in the durable store.
    pub async fn create(&self, payload: UserPayload) -> Result<User, ServiceError> {
        let fields = payload.validate()?;

        let user = self.store.create(&fields).await?;
        info!(id = %user.id, store = self.store.name(), "User created");

        if self.policy.populate_on_create {
            self.populate(&user).await?;
        }

        Ok(user)
    }

    /// Reads a user, cache first.
    ///
    /// A cache hit is returned without consulting the store.
    pub async fn read(&self, raw_id: &str) -> Result<User, ServiceError> {
        let id = UserId::parse(raw_id)?;
        let key = CacheKey::new(id);

        if let Some(user) = self.cache.get(&key).await? {
            debug!(id = %id, "Cache hit");
            return Ok(user);
        }

        debug!(id = %id, store = self.store.name(), "Cache miss, reading from store");
        let user = self.store.get(id).await?;

        self.populate(&user).await?;

        Ok(user)
    }

    /// Updates a user in the store, then overwrites its cache entry.
    pub async fn update(&self, raw_id: &str, payload: UserPayload) -> Result<User, ServiceError> {
        let id = UserId::parse(raw_id)?;
        let fields = payload.validate()?;

        let user = self.store.update(id, &fields).await?;
        info!(id = %id, "User updated in store");

        self.cache
            .set(&CacheKey::new(id), &user)
            .await
            .map_err(|e| self.inconsistent(id, e))?;

        debug!(id = %id, "Cache refreshed after update");
        Ok(user)
    }

    /// Soft-deletes a user in the store, then invalidates its cache entry.
    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = UserId::parse(raw_id)?;

        self.store.delete(id).await?;
        info!(id = %id, "User deleted from store");

        self.cache
            .del(&CacheKey::new(id))
            .await
            .map_err(|e| self.inconsistent(id, e))?;

        debug!(id = %id, "Cache entry invalidated after delete");
        Ok(())
    }

    /// Lists every visible user. The cache is not involved.
    pub async fn list(&self) -> Result<Listing, ServiceError> {
        let users = self.store.get_all().await?;
        debug!(count = users.len(), "Users listed from store");
        Ok(Listing::from(users))
    }

    /// Writes a freshly read or created record into the cache.
    async fn populate(&self, user: &User) -> Result<(), ServiceError> {
        match self.cache.set(&CacheKey::new(user.id), user).await {
            Ok(()) => Ok(()),
            Err(e) => match self.policy.on_populate_failure {
                PopulateFailure::LogAndContinue => {
                    warn!(id = %user.id, error = %e, "Failed to populate cache, serving store value");
                    Ok(())
                },
                PopulateFailure::Fail => Err(self.inconsistent(user.id, e)),
            },
        }
    }

    fn inconsistent(&self, id: UserId, source: CacheError) -> ServiceError {
        error!(
            id = %id,
            cache = self.cache.name(),
            error = %source,
            "Store and cache diverged"
        );
        ServiceError::Inconsistent { id, source }
    }
}
