//! Error types for Aside.
//!
//! Adapters report failures through [`StoreError`] and [`CacheError`]. The
//! coordinator folds those into [`ServiceError`], the taxonomy that the
//! request layer maps onto status codes:
//!
//! | Variant        | Meaning                                              |
//! |----------------|------------------------------------------------------|
//! | `Validation`   | malformed id or payload, raised before any I/O       |
//! | `NotFound`     | no visible record for the id                         |
//! | `Store`        | durable store I/O failure                            |
//! | `Cache`        | cache I/O failure before any store mutation          |
//! | `Inconsistent` | store mutation succeeded, cache could not follow     |

use thiserror::Error;

use crate::model::UserId;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors reported by a durable store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No visible (non soft-deleted) record matches the id.
    #[error("user {0} not found")]
    NotFound(UserId),

    /// Connectivity, constraint or driver failure.
    #[error("store error: {message}")]
    Backend {
        message: String,
        #[source]
        cause: Option<BoxError>,
    },
}

impl StoreError {
    /// Creates a Backend error without a cause.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a Backend error with a cause.
    pub fn backend_with_cause<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors reported by a cache adapter.
///
/// A missing key is never an error: `get` returns `Ok(None)` and `del` of an
/// absent key succeeds.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Connection or protocol failure talking to the cache.
    #[error("cache transport error: {message}")]
    Transport {
        message: String,
        #[source]
        cause: Option<BoxError>,
    },

    /// A value could not be encoded or a stored value could not be decoded.
    #[error("cache serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        cause: Option<BoxError>,
    },
}

impl CacheError {
    /// Creates a Transport error without a cause.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a Transport error with a cause.
    pub fn transport_with_cause<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates a Serialization error from a serde_json failure.
    pub fn serialization(message: impl Into<String>, cause: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }
}

/// Outcome taxonomy of the coordinator.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input rejected before any adapter was called.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The id has no visible record.
    #[error("user {0} not found")]
    NotFound(UserId),

    /// The durable store failed.
    #[error(transparent)]
    Store(StoreError),

    /// The cache failed before the store was touched.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The store write for `id` succeeded but the cache could not be updated.
    #[error("user {id} was written to the store but the cache was not updated: {source}")]
    Inconsistent {
        id: UserId,
        #[source]
        source: CacheError,
    },
}

impl ServiceError {
    /// Creates a Validation error.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true for failures the caller cannot fix by changing its input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Store(_) | Self::Cache(_) | Self::Inconsistent { .. }
        )
    }
}

// NotFound keeps its own variant instead of being folded into Store.
impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}
