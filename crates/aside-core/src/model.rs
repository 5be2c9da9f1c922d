//! Domain types for the user record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Identifier of a user record.
///
/// Always strictly positive: the only constructors reject zero and negative
/// values, so a `UserId` in hand is safe to send to either store.
///
/// # Examples
///
/// ```
/// use aside_core::UserId;
///
/// let id: UserId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
///
/// assert!("0".parse::<UserId>().is_err());
/// assert!("-1".parse::<UserId>().is_err());
/// assert!("abc".parse::<UserId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Returns `Some` only for strictly positive values.
    pub fn new(value: i64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Parses an identifier taken from a request path.
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        if raw.is_empty() {
            return Err(ServiceError::validation("id", "ID is required"));
        }

        raw.parse::<i64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ServiceError::validation("id", "invalid ID format"))
    }

    /// Returns the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<i64> for UserId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("user id must be positive, got {}", value))
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user record as held by the durable store.
///
/// The serialized form is the one exposed over HTTP and the one kept in the
/// cache:
///
/// ```json
/// {"ID":1,"CreatedAt":"...","UpdatedAt":"...","DeletedAt":null,"name":"Alice"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "ID")]
    pub id: UserId,

    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,

    /// Non-null marks a soft-deleted record.
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,

    pub name: String,
}

impl User {
    /// Returns true if the record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Request body for create and update.
///
/// A missing `name` deserializes to an empty string so that it is rejected by
/// validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub name: String,
}

impl UserPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Valida el payload y produce los campos que se envian al store.
    pub fn validate(self) -> Result<UserFields, ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::validation("name", "Name is required"));
        }
        Ok(UserFields { name: self.name })
    }
}

/// Validated mutable fields of a user.
///
/// Only obtainable through [`UserPayload::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    name: String,
}

impl UserFields {
    pub fn name(&self) -> &str {
        &self.name
    }
}
