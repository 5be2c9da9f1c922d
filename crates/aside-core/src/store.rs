//! Durable store capability.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{User, UserFields, UserId};

/// The source of truth for user records.
///
/// Implementations own the identifier sequence and all timestamps. Records
/// with a non-null `deleted_at` are invisible to every operation.
///
/// # Implementors
///
/// - `PostgresUserStore` - `users` table through a deadpool connection pool
/// - `MemoryUserStore` - in-process map, for local runs and tests
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new record and returns it with its assigned id and timestamps.
    async fn create(&self, fields: &UserFields) -> Result<User, StoreError>;

    /// Fetches a visible record.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if no visible record matches `id`
    /// - `StoreError::Backend` on any other failure
    async fn get(&self, id: UserId) -> Result<User, StoreError>;

    /// Returns every visible record. An empty vector is not an error.
    async fn get_all(&self) -> Result<Vec<User>, StoreError>;

    /// Applies `fields` to an existing record and returns the stored result.
    ///
    /// Existence is checked before the write; an absent record yields
    /// `StoreError::NotFound` and nothing is written.
    async fn update(&self, id: UserId, fields: &UserFields) -> Result<User, StoreError>;

    /// Soft-deletes an existing record.
    ///
    /// Existence is checked before the write; an absent record yields
    /// `StoreError::NotFound`.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;

    /// Verifies that the store is reachable.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Returns the name of this store, for logging.
    fn name(&self) -> &str;
}
