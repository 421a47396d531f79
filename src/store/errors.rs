//! Store error types
//!
//! Store failures propagate to the caller unchanged; the taxonomy
//! hooks neither catch nor wrap them.

use serde_json::Value;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by record stores
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The collection has not been registered
    #[error("unknown collection '{0}'")]
    UnknownCollection(String),

    /// A commit would duplicate a schema-declared unique value
    #[error("unique value violation on '{collection}.{field}': {value} is already present")]
    UniqueViolation {
        collection: String,
        field: String,
        value: Value,
    },

    /// The committed document is not a JSON object
    #[error("collection '{0}' only stores JSON objects")]
    NotAnObject(String),
}

impl StoreError {
    pub fn unknown_collection(collection: impl Into<String>) -> Self {
        Self::UnknownCollection(collection.into())
    }

    pub fn unique_violation(
        collection: impl Into<String>,
        field: impl Into<String>,
        value: Value,
    ) -> Self {
        Self::UniqueViolation {
            collection: collection.into(),
            field: field.into(),
            value,
        }
    }
}
