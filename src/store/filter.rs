//! Query filters for record stores
//!
//! Filters are a small AST: equality on a dotted field path, identity
//! exclusion, and AND/OR combinators. Matching is strict equality with
//! no type coercion; null values never match. When a path segment
//! lands on an array, the remaining path is matched against every
//! element, so `aliasSlugs.slug` finds a value inside an array of
//! `{slug}` rows.

use serde_json::Value;

/// A store query filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field at `field` (dotted path) equals `value`
    Eq { field: String, value: Value },
    /// Document id differs from the given id
    NotId(String),
    /// All sub-filters match
    And(Vec<Filter>),
    /// At least one sub-filter matches
    Or(Vec<Filter>),
}

impl Filter {
    /// Equality on a dotted field path
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Filter::Eq {
            field: field.into(),
            value,
        }
    }

    /// Excludes the document with the given id
    pub fn not_id(id: impl Into<String>) -> Self {
        Filter::NotId(id.into())
    }

    /// Conjunction of filters
    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And(filters)
    }

    /// Disjunction of filters
    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Or(filters)
    }

    /// Checks whether a document matches this filter.
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Filter::Eq { field, value } => {
                let segments: Vec<&str> = field.split('.').collect();
                path_eq(document, &segments, value)
            }
            Filter::NotId(id) => {
                document.get("id").and_then(Value::as_str) != Some(id.as_str())
            }
            Filter::And(filters) => filters.iter().all(|f| f.matches(document)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(document)),
        }
    }
}

/// Walks `segments` into `value` and compares the leaf against
/// `expected`. Arrays along the path are searched element-wise.
fn path_eq(value: &Value, segments: &[&str], expected: &Value) -> bool {
    match segments.split_first() {
        None => !value.is_null() && value == expected,
        Some((segment, rest)) => match value {
            Value::Object(map) => map
                .get(*segment)
                .is_some_and(|child| path_eq(child, rest, expected)),
            Value::Array(items) => items.iter().any(|item| path_eq(item, segments, expected)),
            _ => false,
        },
    }
}
