//! Cache key for user records.

use std::fmt;

use crate::model::UserId;

/// Key under which a user is cached.
///
/// Renders as the decimal form of the id. Adapters sharing a keyspace with
/// other data add their own prefix through [`CacheKey::prefixed`].
///
/// # Examples
///
/// ```
/// use aside_core::{CacheKey, UserId};
///
/// let key = CacheKey::new(UserId::new(7).unwrap());
/// assert_eq!(key.to_string(), "7");
/// assert_eq!(key.prefixed("users:"), "users:7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    id: UserId,
}

impl CacheKey {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }

    /// Returns the id this key refers to.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the key with the given namespace prefix prepended.
    pub fn prefixed(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.id)
    }
}

impl From<UserId> for CacheKey {
    fn from(id: UserId) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
