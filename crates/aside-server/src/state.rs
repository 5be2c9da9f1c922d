//! Application state.

use std::sync::Arc;

use aside_backends::{MemoryUserStore, MokaUserCache};
use aside_core::{CachePolicy, UserService};

use crate::metrics::MeteredCache;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache-aside coordinator.
    users: UserService,
}

impl AppState {
    /// Creates a new AppState with the given coordinator.
    pub fn new(users: UserService) -> Self {
        Self { users }
    }

    /// Creates an AppState over the in-process store and a metered moka cache.
    pub fn in_memory(policy: CachePolicy) -> Self {
        let store = Arc::new(MemoryUserStore::new());
        let cache = Arc::new(MeteredCache::new(MokaUserCache::new()));
        Self::new(UserService::new(store, cache, policy))
    }

    /// Returns a reference to the coordinator.
    pub fn users(&self) -> &UserService {
        &self.users
    }
}
