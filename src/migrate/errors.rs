//! Migration error types

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for migration operations
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Errors raised while generating or registering migrations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MigrateError {
    /// Migration name is not `YYYYMMDD_HHMMSS`
    #[error("malformed migration name '{0}', expected YYYYMMDD_HHMMSS")]
    BadName(String),

    /// Migration sorts before the last registered one
    #[error("migration '{name}' is older than already-registered '{previous}'")]
    OutOfOrder { name: String, previous: String },

    /// Migration name already registered
    #[error("duplicate migration '{0}'")]
    Duplicate(String),

    /// The source schema is malformed
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
