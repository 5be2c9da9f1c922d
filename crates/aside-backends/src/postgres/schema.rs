//! SQL for the `users` table.

/// Columns in the order `row_to_user` reads them.
pub(crate) const COLUMNS: &str = "id, created_at, updated_at, deleted_at, name";

pub(crate) const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id          BIGSERIAL PRIMARY KEY,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at  TIMESTAMPTZ NULL,
    name        TEXT NOT NULL
)";

pub(crate) const CREATE_DELETED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_users_deleted_at ON users (deleted_at)";

pub(crate) fn insert() -> String {
    format!(
        "INSERT INTO users (name, created_at, updated_at) VALUES ($1, now(), now()) RETURNING {}",
        COLUMNS
    )
}

pub(crate) fn select_visible() -> String {
    format!(
        "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
        COLUMNS
    )
}

/// Locks the row for the rest of the transaction.
pub(crate) fn select_visible_for_update() -> String {
    format!("{} FOR UPDATE", select_visible())
}

pub(crate) fn select_all_visible() -> String {
    format!(
        "SELECT {} FROM users WHERE deleted_at IS NULL ORDER BY id",
        COLUMNS
    )
}

pub(crate) fn update_name() -> String {
    format!(
        "UPDATE users SET name = $2, updated_at = now() WHERE id = $1 RETURNING {}",
        COLUMNS
    )
}

pub(crate) const SOFT_DELETE: &str = "UPDATE users SET deleted_at = now() WHERE id = $1";
