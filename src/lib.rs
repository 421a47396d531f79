//! tagstore - a strict, deterministic hashtag taxonomy engine
//!
//! Provides the content model for a canonical hashtag collection:
//! slug normalization, synonym deduplication, alias derivation,
//! global slug/alias uniqueness enforcement against a record store,
//! and SQL migration generation mirroring the collection schema.

pub mod hashtag;
pub mod merge;
pub mod migrate;
pub mod schema;
pub mod slug;
pub mod store;
