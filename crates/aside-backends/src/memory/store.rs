//! In-memory `UserStore`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use aside_core::{StoreError, User, UserFields, UserId, UserStore};
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Rows {
    by_id: BTreeMap<UserId, User>,
    last_id: i64,
}

/// User store held in a map, with soft-delete semantics.
///
/// Ids start at 1 and are never reused, soft-deleted rows included.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    rows: RwLock<Rows>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rows, soft-deleted ones included.
    pub fn row_count(&self) -> usize {
        self.rows.read().by_id.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, fields: &UserFields) -> Result<User, StoreError> {
        let mut rows = self.rows.write();
        let raw_id = rows.last_id + 1;
        let id = UserId::new(raw_id)
            .ok_or_else(|| StoreError::backend(format!("id sequence exhausted at {}", raw_id)))?;
        rows.last_id = raw_id;

        let now = Utc::now();
        let user = User {
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            name: fields.name().to_string(),
        };
        rows.by_id.insert(id, user.clone());

        debug!(id = %id, "User inserted");
        Ok(user)
    }

    async fn get(&self, id: UserId) -> Result<User, StoreError> {
        self.rows
            .read()
            .by_id
            .get(&id)
            .filter(|u| !u.is_deleted())
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .rows
            .read()
            .by_id
            .values()
            .filter(|u| !u.is_deleted())
            .cloned()
            .collect())
    }

    async fn update(&self, id: UserId, fields: &UserFields) -> Result<User, StoreError> {
        let mut rows = self.rows.write();
        let row = rows
            .by_id
            .get_mut(&id)
            .filter(|u| !u.is_deleted())
            .ok_or(StoreError::NotFound(id))?;

        row.name = fields.name().to_string();
        row.updated_at = Utc::now();

        debug!(id = %id, "User updated");
        Ok(row.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        let mut rows = self.rows.write();
        let row = rows
            .by_id
            .get_mut(&id)
            .filter(|u| !u.is_deleted())
            .ok_or(StoreError::NotFound(id))?;

        row.deleted_at = Some(Utc::now());

        debug!(id = %id, "User soft-deleted");
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
