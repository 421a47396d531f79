//! Upsert write pipeline
//!
//! Sequences a hashtag write end to end:
//!
//! 1. Updates lay the partial draft over the stored document
//!    (deep merge; arrays replace wholesale)
//! 2. `prepare_draft` normalizes in memory
//! 3. Field defaults fill in, identity and timestamps are stamped
//! 4. Schema validation
//! 5. `enforce_uniqueness` against every other record
//! 6. Store commit (which re-checks unique fields)
//!
//! Any failure aborts the write before the commit; no partial state
//! is left behind.

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::merge::deep_merge;
use crate::schema::{CollectionSchema, DocumentValidator};
use crate::store::RecordStore;

use super::errors::{HashtagError, HashtagResult};
use super::normalize::prepare_draft;
use super::uniqueness::enforce_uniqueness;
use super::COLLECTION;

/// Runs the hashtag write pipeline against an injected store.
pub struct HashtagWriter {
    schema: CollectionSchema,
}

impl HashtagWriter {
    pub fn new() -> Self {
        Self {
            schema: super::collection(),
        }
    }

    /// The collection schema this writer validates against.
    pub fn schema(&self) -> &CollectionSchema {
        &self.schema
    }

    /// Creates a new hashtag from a draft, returning the committed
    /// document.
    pub fn create(&self, store: &mut dyn RecordStore, draft: Value) -> HashtagResult<Value> {
        let mut doc = draft;
        prepare_draft(&mut doc);
        self.apply_defaults(&mut doc);

        let id = Uuid::new_v4().to_string();
        if let Some(map) = doc.as_object_mut() {
            let now = Utc::now().to_rfc3339();
            map.insert("id".to_string(), Value::String(id.clone()));
            map.insert("createdAt".to_string(), json!(now));
            map.insert("updatedAt".to_string(), json!(now));
        }

        DocumentValidator::new(&self.schema).validate(&doc)?;
        enforce_uniqueness(&doc, None, &*store)?;

        store.commit(COLLECTION, &id, doc.clone())?;
        tracing::debug!(id = %id, "hashtag created");
        Ok(doc)
    }

    /// Updates an existing hashtag with a partial draft, returning
    /// the committed document.
    pub fn update(
        &self,
        store: &mut dyn RecordStore,
        id: &str,
        draft: Value,
    ) -> HashtagResult<Value> {
        let existing = store
            .get(COLLECTION, id)?
            .ok_or_else(|| HashtagError::NotFound(id.to_string()))?;

        let mut doc = deep_merge(&existing, &draft);
        prepare_draft(&mut doc);
        self.apply_defaults(&mut doc);

        if let Some(map) = doc.as_object_mut() {
            // Identity is immutable; drafts cannot reassign it
            map.insert("id".to_string(), Value::String(id.to_string()));
            map.insert("updatedAt".to_string(), json!(Utc::now().to_rfc3339()));
        }

        DocumentValidator::new(&self.schema).validate(&doc)?;
        enforce_uniqueness(&doc, Some(id), &*store)?;

        store.commit(COLLECTION, id, doc.clone())?;
        tracing::debug!(id = %id, "hashtag updated");
        Ok(doc)
    }

    /// Fills schema defaults for fields the draft leaves absent.
    fn apply_defaults(&self, doc: &mut Value) {
        let Some(map) = doc.as_object_mut() else {
            return;
        };
        for field in &self.schema.fields {
            if let Some(default) = &field.default {
                if !map.contains_key(&field.name) {
                    map.insert(field.name.clone(), default.clone());
                }
            }
        }
    }
}

impl Default for HashtagWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashtag::{collection, ConflictField, Hashtag};
    use crate::store::{MemoryStore, StoreError};

    fn setup() -> (MemoryStore, HashtagWriter) {
        let mut store = MemoryStore::new();
        store.register(collection());
        (store, HashtagWriter::new())
    }

    #[test]
    fn test_create_normalizes_and_stamps() {
        let (mut store, writer) = setup();

        let doc = writer
            .create(
                &mut store,
                json!({"title": "#Catholicism", "synonyms": [{"term": "catholic faith"}]}),
            )
            .unwrap();

        assert_eq!(doc["title"], json!("Catholicism"));
        assert_eq!(doc["slug"], json!("catholicism"));
        assert_eq!(doc["aliasSlugs"], json!([{"slug": "catholic_faith"}]));
        assert_eq!(doc["slugLock"], json!(true));
        assert!(doc["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(doc["createdAt"], doc["updatedAt"]);

        // The committed document is a well-formed typed record
        let hashtag = Hashtag::from_value(&doc).unwrap();
        assert_eq!(hashtag.slug, "catholicism");
    }

    #[test]
    fn test_create_missing_title_rejected_before_commit() {
        let (mut store, writer) = setup();

        let result = writer.create(&mut store, json!({"slug": "orphan"}));
        assert!(matches!(result, Err(HashtagError::Schema(_))));
        assert!(store.is_empty(COLLECTION).unwrap());
    }

    #[test]
    fn test_create_conflict_aborts_commit() {
        let (mut store, writer) = setup();
        writer
            .create(&mut store, json!({"title": "Networking"}))
            .unwrap();

        let err = writer
            .create(&mut store, json!({"title": "Nets", "slug": "networking"}))
            .unwrap_err();
        assert_eq!(err.conflict_field(), Some(ConflictField::Slug));
        assert_eq!(store.len(COLLECTION).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_title_hits_store_backstop() {
        let (mut store, writer) = setup();
        writer
            .create(&mut store, json!({"title": "DevOps"}))
            .unwrap();

        // Distinct slug dodges the application-level check; the
        // store's unique index on title still rejects the write
        let err = writer
            .create(&mut store, json!({"title": "DevOps", "slug": "other"}))
            .unwrap_err();
        assert!(matches!(
            err,
            HashtagError::Store(StoreError::UniqueViolation { ref field, .. }) if field == "title"
        ));
    }

    #[test]
    fn test_update_merges_partial_draft() {
        let (mut store, writer) = setup();
        let created = writer
            .create(
                &mut store,
                json!({"title": "DevOps", "description": "ops culture"}),
            )
            .unwrap();
        let id = created["id"].as_str().unwrap();

        let updated = writer
            .update(&mut store, id, json!({"synonyms": [{"term": "SRE"}]}))
            .unwrap();

        // Untouched fields survive the merge
        assert_eq!(updated["title"], json!("DevOps"));
        assert_eq!(updated["description"], json!("ops culture"));
        assert_eq!(updated["slug"], json!("devops"));
        assert_eq!(updated["aliasSlugs"], json!([{"slug": "sre"}]));
        assert_eq!(updated["createdAt"], created["createdAt"]);
    }

    #[test]
    fn test_update_recomputes_aliases_every_write() {
        let (mut store, writer) = setup();
        let created = writer
            .create(
                &mut store,
                json!({"title": "DevOps", "synonyms": [{"term": "SRE"}]}),
            )
            .unwrap();
        let id = created["id"].as_str().unwrap();
        assert_eq!(created["aliasSlugs"], json!([{"slug": "sre"}]));

        // Replacing synonyms replaces the derived aliases wholesale
        let updated = writer
            .update(
                &mut store,
                id,
                json!({"synonyms": [{"term": "platform eng"}]}),
            )
            .unwrap();
        assert_eq!(updated["aliasSlugs"], json!([{"slug": "platform_eng"}]));
    }

    #[test]
    fn test_update_same_slug_no_self_collision() {
        let (mut store, writer) = setup();
        let created = writer
            .create(&mut store, json!({"title": "DevOps"}))
            .unwrap();
        let id = created["id"].as_str().unwrap();

        let updated = writer
            .update(&mut store, id, json!({"description": "still devops"}))
            .unwrap();
        assert_eq!(updated["slug"], json!("devops"));
    }

    #[test]
    fn test_update_cannot_reassign_identity() {
        let (mut store, writer) = setup();
        let created = writer
            .create(&mut store, json!({"title": "DevOps"}))
            .unwrap();
        let id = created["id"].as_str().unwrap();

        let updated = writer
            .update(&mut store, id, json!({"id": "hijacked"}))
            .unwrap();
        assert_eq!(updated["id"], json!(id));
    }

    #[test]
    fn test_update_missing_record() {
        let (mut store, writer) = setup();
        let err = writer
            .update(&mut store, "nope", json!({"title": "X"}))
            .unwrap_err();
        assert!(matches!(err, HashtagError::NotFound(ref id) if id == "nope"));
    }

    #[test]
    fn test_empty_slug_records_may_coexist() {
        let (mut store, writer) = setup();
        writer.create(&mut store, json!({"title": "!!!"})).unwrap();
        writer.create(&mut store, json!({"title": "???"})).unwrap();
        assert_eq!(store.len(COLLECTION).unwrap(), 2);
    }
}
