//! PostgreSQL implementation of `UserStore`.

use async_trait::async_trait;
use aside_core::{StoreError, User, UserFields, UserId, UserStore};
use chrono::{DateTime, Utc};
use deadpool_postgres::{Object, Pool};
use tokio_postgres::Row;
use tracing::{debug, info};

use super::config::PostgresConfig;
use super::schema;
use crate::error::BackendError;

/// User store backed by the `users` table.
///
/// Deletes are soft: the row keeps its data and gets a `deleted_at` stamp,
/// after which every query treats it as absent.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: Pool,
}

impl PostgresUserStore {
    /// Create a store over an existing pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a store from configuration. Connections are opened lazily.
    pub fn from_config(config: &PostgresConfig) -> Result<Self, BackendError> {
        Ok(Self::new(config.create_pool()?))
    }

    /// Creates the `users` table and its index if they do not exist.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.conn().await?;
        conn.batch_execute(&format!(
            "{};\n{};",
            schema::CREATE_TABLE,
            schema::CREATE_DELETED_AT_INDEX
        ))
        .await
        .map_err(|e| db_error("migrate users table", e))?;

        info!("Users table migrated");
        Ok(())
    }

    async fn conn(&self) -> Result<Object, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::backend_with_cause("failed to get database connection", e))
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create(&self, fields: &UserFields) -> Result<User, StoreError> {
        let conn = self.conn().await?;
        let row = conn
            .query_one(schema::insert().as_str(), &[&fields.name()])
            .await
            .map_err(|e| db_error("insert user", e))?;

        let user = row_to_user(&row)?;
        debug!(id = %user.id, "User inserted");
        Ok(user)
    }

    async fn get(&self, id: UserId) -> Result<User, StoreError> {
        let conn = self.conn().await?;
        let row = conn
            .query_opt(schema::select_visible().as_str(), &[&id.get()])
            .await
            .map_err(|e| db_error("select user", e))?;

        match row {
            Some(row) => row_to_user(&row),
            None => {
                debug!(id = %id, "User not found in database");
                Err(StoreError::NotFound(id))
            },
        }
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let conn = self.conn().await?;
        let rows = conn
            .query(schema::select_all_visible().as_str(), &[])
            .await
            .map_err(|e| db_error("select users", e))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn update(&self, id: UserId, fields: &UserFields) -> Result<User, StoreError> {
        let mut conn = self.conn().await?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        // Existence check holds a row lock until commit
        let existing = tx
            .query_opt(schema::select_visible_for_update().as_str(), &[&id.get()])
            .await
            .map_err(|e| db_error("lock user", e))?;
        if existing.is_none() {
            debug!(id = %id, "User not found in database");
            return Err(StoreError::NotFound(id));
        }

        let row = tx
            .query_one(schema::update_name().as_str(), &[&id.get(), &fields.name()])
            .await
            .map_err(|e| db_error("update user", e))?;
        tx.commit()
            .await
            .map_err(|e| db_error("commit update", e))?;

        let user = row_to_user(&row)?;
        debug!(id = %id, "User updated in database");
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let existing = tx
            .query_opt(schema::select_visible_for_update().as_str(), &[&id.get()])
            .await
            .map_err(|e| db_error("lock user", e))?;
        if existing.is_none() {
            debug!(id = %id, "User not found in database");
            return Err(StoreError::NotFound(id));
        }

        tx.execute(schema::SOFT_DELETE, &[&id.get()])
            .await
            .map_err(|e| db_error("soft delete user", e))?;
        tx.commit()
            .await
            .map_err(|e| db_error("commit delete", e))?;

        debug!(id = %id, "User soft-deleted in database");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let conn = self.conn().await?;
        conn.simple_query("SELECT 1")
            .await
            .map_err(|e| db_error("health check", e))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "postgres"
    }
}

fn db_error(operation: &str, err: tokio_postgres::Error) -> StoreError {
    StoreError::backend_with_cause(format!("{} failed", operation), err)
}

/// Maps a row selected with `schema::COLUMNS`.
fn row_to_user(row: &Row) -> Result<User, StoreError> {
    let raw_id: i64 = row.try_get("id").map_err(|e| db_error("read id", e))?;
    let id = UserId::new(raw_id)
        .ok_or_else(|| StoreError::backend(format!("non-positive id {} in users table", raw_id)))?;

    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("read created_at", e))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| db_error("read updated_at", e))?;
    let deleted_at: Option<DateTime<Utc>> = row
        .try_get("deleted_at")
        .map_err(|e| db_error("read deleted_at", e))?;
    let name: String = row.try_get("name").map_err(|e| db_error("read name", e))?;

    Ok(User {
        id,
        created_at,
        updated_at,
        deleted_at,
        name,
    })
}
