//! In-memory record store
//!
//! Reference `RecordStore` implementation. Documents live in a
//! `BTreeMap` per collection, so scans and find results are in
//! deterministic id order.
//!
//! Commit-time backstop: for every field the collection schema
//! declares unique, the commit scans the other documents and rejects
//! duplicates. This mirrors the unique index the generated DDL puts
//! on the same columns and closes the check-then-act window for those
//! fields within this store.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::schema::CollectionSchema;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::RecordStore;

struct Collection {
    schema: CollectionSchema,
    documents: BTreeMap<String, Value>,
}

/// In-memory, single-writer record store.
#[derive(Default)]
pub struct MemoryStore {
    collections: BTreeMap<String, Collection>,
}

impl MemoryStore {
    /// Creates an empty store with no collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection. Re-registering replaces the schema and
    /// keeps the documents.
    pub fn register(&mut self, schema: CollectionSchema) {
        let slug = schema.slug.clone();
        match self.collections.get_mut(&slug) {
            Some(collection) => collection.schema = schema,
            None => {
                self.collections.insert(
                    slug,
                    Collection {
                        schema,
                        documents: BTreeMap::new(),
                    },
                );
            }
        }
    }

    /// Returns the number of documents in a collection.
    pub fn len(&self, collection: &str) -> StoreResult<usize> {
        Ok(self.collection(collection)?.documents.len())
    }

    /// Returns true if the collection holds no documents.
    pub fn is_empty(&self, collection: &str) -> StoreResult<bool> {
        Ok(self.len(collection)? == 0)
    }

    /// Removes the document under `id`, returning it if present.
    pub fn remove(&mut self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        Ok(self.collection_mut(collection)?.documents.remove(id))
    }

    fn collection(&self, slug: &str) -> StoreResult<&Collection> {
        self.collections
            .get(slug)
            .ok_or_else(|| StoreError::unknown_collection(slug))
    }

    fn collection_mut(&mut self, slug: &str) -> StoreResult<&mut Collection> {
        self.collections
            .get_mut(slug)
            .ok_or_else(|| StoreError::unknown_collection(slug))
    }

    /// Rejects the commit if a unique field value already appears on
    /// another document.
    fn check_unique(collection: &Collection, id: &str, document: &Value) -> StoreResult<()> {
        for field in collection.schema.unique_fields() {
            let value = match document.get(&field.name) {
                Some(Value::Null) | None => continue,
                Some(v) => v,
            };

            for (other_id, other) in &collection.documents {
                if other_id == id {
                    continue;
                }
                if other.get(&field.name) == Some(value) {
                    return Err(StoreError::unique_violation(
                        &collection.schema.slug,
                        &field.name,
                        value.clone(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn find(&self, collection: &str, filter: &Filter, limit: usize) -> StoreResult<Vec<Value>> {
        let collection = self.collection(collection)?;
        Ok(collection
            .documents
            .values()
            .filter(|doc| filter.matches(doc))
            .take(limit)
            .cloned()
            .collect())
    }

    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        Ok(self.collection(collection)?.documents.get(id).cloned())
    }

    fn commit(&mut self, collection: &str, id: &str, document: Value) -> StoreResult<()> {
        if !document.is_object() {
            return Err(StoreError::NotAnObject(collection.to_string()));
        }

        let entry = self.collection_mut(collection)?;
        Self::check_unique(entry, id, &document)?;

        tracing::debug!(collection, id, "committing document");
        entry.documents.insert(id.to_string(), document);
        Ok(())
    }
}
