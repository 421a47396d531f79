//! Pre-commit uniqueness enforcement
//!
//! Queries the record store for collisions between the in-flight
//! record and every other hashtag:
//!
//! 1. Primary slug vs other primary slugs and other alias slugs
//! 2. Own alias slugs vs other primary slugs
//!
//! Both queries use limit-one semantics; the first hit aborts the
//! write. The record under update is excluded by identity. A record
//! whose slug is empty or absent skips all checks, so empty-slug
//! records may coexist.
//!
//! The check and the commit are separate store operations with no
//! atomic guarantee between them; fields the schema declares unique
//! are re-checked by the store at commit time.

use serde_json::{json, Value};

use crate::store::{Filter, RecordStore};

use super::errors::{HashtagError, HashtagResult};
use super::COLLECTION;

/// Checks the record's slug and alias slugs against every other
/// record in the store. `prior_id` is the identity of the record
/// being updated, absent for creation.
pub fn enforce_uniqueness(
    record: &Value,
    prior_id: Option<&str>,
    store: &dyn RecordStore,
) -> HashtagResult<()> {
    let slug = match record.get("slug").and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(()),
    };
    let me = prior_id.unwrap_or("");

    // (1) Does the primary slug collide with anyone else's primary
    // slug or alias slug?
    let filter = Filter::and(vec![
        Filter::not_id(me),
        Filter::or(vec![
            Filter::eq("slug", json!(slug)),
            Filter::eq("aliasSlugs.slug", json!(slug)),
        ]),
    ]);
    let hits = store.find(COLLECTION, &filter, 1)?;
    if let Some(other) = hits.first() {
        return Err(HashtagError::slug_conflict(slug, title_of(other)));
    }

    // (2) Do any of the alias slugs collide with someone else's
    // primary slug?
    let aliases: Vec<&str> = record
        .get("aliasSlugs")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row.get("slug").and_then(Value::as_str))
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if !aliases.is_empty() {
        let alias_or = aliases
            .iter()
            .map(|alias| Filter::eq("slug", json!(alias)))
            .collect();
        let filter = Filter::and(vec![Filter::not_id(me), Filter::or(alias_or)]);
        let hits = store.find(COLLECTION, &filter, 1)?;
        if let Some(other) = hits.first() {
            return Err(HashtagError::synonym_conflict(title_of(other)));
        }
    }

    Ok(())
}

fn title_of(document: &Value) -> &str {
    document
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("untitled")
}
