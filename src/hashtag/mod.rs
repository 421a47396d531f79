//! The hashtags taxonomy collection
//!
//! Canonical set of hashtags used across posts. Each record carries a
//! human-facing title, a derived machine slug, optional free-text
//! description, a list of synonym terms, and a derived set of alias
//! slugs used for collision lookup.
//!
//! Writes run a two-phase pipeline:
//! 1. `prepare_draft` (pure, in-memory): title/slug/synonym
//!    normalization and alias derivation
//! 2. `enforce_uniqueness` (store-querying): global slug and alias
//!    collision checks against every other record
//!
//! `HashtagWriter` sequences the full upsert path around those phases.

mod errors;
mod model;
mod normalize;
mod uniqueness;
mod writer;

pub use errors::{ConflictField, HashtagError, HashtagResult};
pub use model::{AliasSlug, Hashtag, Synonym};
pub use normalize::prepare_draft;
pub use uniqueness::enforce_uniqueness;
pub use writer::HashtagWriter;

use serde_json::json;

use crate::schema::{CollectionSchema, FieldDef};

/// Collection identifier for hashtag records
pub const COLLECTION: &str = "hashtags";

/// Returns the hashtags collection schema.
///
/// `aliasSlugs` is derived from `synonyms` on every write and is not
/// independently editable. `title` is unique at the store layer as a
/// backstop against duplicate display names.
pub fn collection() -> CollectionSchema {
    CollectionSchema::new(
        COLLECTION,
        vec![
            FieldDef::text("title").required().unique(),
            FieldDef::text("description"),
            FieldDef::array("synonyms", vec![FieldDef::text("term")]),
            FieldDef::array("aliasSlugs", vec![FieldDef::text("slug")]),
            FieldDef::text("slug").indexed(),
            FieldDef::bool("slugLock").with_default(json!(true)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_structure_is_valid() {
        collection().validate_structure().unwrap();
    }

    #[test]
    fn test_title_is_the_only_unique_field() {
        let schema = collection();
        let unique: Vec<&str> = schema.unique_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(unique, vec!["title"]);
    }

    #[test]
    fn test_slug_is_indexed() {
        let schema = collection();
        assert!(schema.field("slug").unwrap().indexed);
    }
}
