//! Record store abstraction
//!
//! The taxonomy hooks are written against the `RecordStore` trait so
//! the backing store is an injected dependency rather than ambient
//! state. `MemoryStore` is the reference implementation: deterministic
//! iteration order, equality filters with dotted-path array traversal,
//! and a commit-time backstop for schema-declared unique fields.

mod errors;
mod filter;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use filter::Filter;
pub use memory::MemoryStore;

use serde_json::Value;

/// A queryable, mutable store of collection documents.
///
/// `find` and `get` are read-only; `commit` performs an upsert. The
/// uniqueness hook performs a `find` and the write a `commit` as two
/// separate operations, so cross-record slug collisions are checked
/// without any atomicity guarantee between the two. Fields the schema
/// declares unique are re-checked inside `commit` itself.
pub trait RecordStore {
    /// Returns documents of `collection` matching `filter`, in
    /// deterministic id order, at most `limit` of them.
    fn find(&self, collection: &str, filter: &Filter, limit: usize) -> StoreResult<Vec<Value>>;

    /// Returns the document with the given id, if present.
    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Inserts or replaces the document under `id`.
    fn commit(&mut self, collection: &str, id: &str, document: Value) -> StoreResult<()>;
}
