//! Hashtag write errors
//!
//! `Conflict` is the validation failure surfaced to the end user when
//! a slug or alias collides with another record; the write aborts with
//! no partial commit. Schema and store failures pass through
//! unchanged.

use thiserror::Error;

use crate::schema::SchemaError;
use crate::store::StoreError;

/// Result type for hashtag operations
pub type HashtagResult<T> = Result<T, HashtagError>;

/// The record field a conflict is reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    /// The primary slug collided
    Slug,
    /// A synonym's alias slug collided
    Synonyms,
}

impl ConflictField {
    /// Returns the document field path for this conflict
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictField::Slug => "slug",
            ConflictField::Synonyms => "synonyms",
        }
    }
}

/// Errors raised by the hashtag write pipeline
#[derive(Debug, Error)]
pub enum HashtagError {
    /// Slug or alias collision with another record
    #[error("{message}")]
    Conflict {
        field: ConflictField,
        message: String,
    },

    /// Update target does not exist
    #[error("hashtag '{0}' not found")]
    NotFound(String),

    /// Document failed schema validation
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Store failure, propagated unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HashtagError {
    /// Conflict on the primary slug, naming the colliding record.
    pub fn slug_conflict(slug: &str, other_title: &str) -> Self {
        Self::Conflict {
            field: ConflictField::Slug,
            message: format!(
                "Slug \"{}\" is already used (as a slug or synonym) by \"{}\".",
                slug, other_title
            ),
        }
    }

    /// Conflict between a synonym's alias and another record's
    /// primary slug.
    pub fn synonym_conflict(other_title: &str) -> Self {
        Self::Conflict {
            field: ConflictField::Synonyms,
            message: format!(
                "A synonym conflicts with the primary slug of \"{}\". Remove or change that synonym.",
                other_title
            ),
        }
    }

    /// Returns the conflict field when this is a conflict.
    pub fn conflict_field(&self) -> Option<ConflictField> {
        match self {
            Self::Conflict { field, .. } => Some(*field),
            _ => None,
        }
    }
}
