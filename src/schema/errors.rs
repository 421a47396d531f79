//! Schema error types
//!
//! All schema errors reject the offending write; none are fatal to
//! the process.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while validating schema structure or documents
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A declared required field is absent (or null)
    #[error("collection '{collection}': missing required field '{field}'")]
    MissingField { collection: String, field: String },

    /// The document carries a field the schema does not declare
    #[error("collection '{collection}': unknown field '{field}'")]
    UnknownField { collection: String, field: String },

    /// A field value has the wrong type
    #[error("collection '{collection}': field '{field}' expected {expected}, got {actual}")]
    TypeMismatch {
        collection: String,
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The schema declaration itself is malformed
    #[error("invalid collection '{collection}': {reason}")]
    InvalidStructure { collection: String, reason: String },
}

impl SchemaError {
    pub fn missing_field(collection: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            collection: collection.into(),
            field: field.into(),
        }
    }

    pub fn unknown_field(collection: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            collection: collection.into(),
            field: field.into(),
        }
    }

    pub fn type_mismatch(
        collection: impl Into<String>,
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            collection: collection.into(),
            field: field.into(),
            expected,
            actual,
        }
    }

    pub fn invalid_structure(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidStructure {
            collection: collection.into(),
            reason: reason.into(),
        }
    }

    /// Returns the field path the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. }
            | Self::UnknownField { field, .. }
            | Self::TypeMismatch { field, .. } => Some(field),
            Self::InvalidStructure { .. } => None,
        }
    }
}
