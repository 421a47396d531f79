//! Typed hashtag record
//!
//! The store boundary works on JSON objects; this is the typed view
//! for callers that want one. Field names follow the document
//! (camelCase) spelling on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An alternate textual form of a hashtag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonym {
    /// Display form of the synonym, leading `#` stripped
    pub term: String,
}

impl Synonym {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }
}

/// The slugified form of a synonym, used for collision lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasSlug {
    /// Canonical slug token
    pub slug: String,
}

impl AliasSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

/// A persisted hashtag record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hashtag {
    /// Record identity
    pub id: String,
    /// Human-facing display name, unique across all hashtags
    pub title: String,
    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canonical machine key, derived from the title unless supplied
    #[serde(default)]
    pub slug: String,
    /// When true the slug stays fixed as the title changes
    #[serde(default = "default_slug_lock")]
    pub slug_lock: bool,
    /// Alternate terms resolving to this hashtag
    #[serde(default)]
    pub synonyms: Vec<Synonym>,
    /// Derived from synonyms on every write, never edited directly
    #[serde(default)]
    pub alias_slugs: Vec<AliasSlug>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_slug_lock() -> bool {
    true
}

impl Hashtag {
    /// Deserializes a stored document into the typed record.
    pub fn from_value(document: &Value) -> serde_json::Result<Self> {
        serde_json::from_value(document.clone())
    }

    /// Serializes the record back to its document form.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_round_trip() {
        let doc = json!({
            "id": "h1",
            "title": "DevOps",
            "slug": "devops",
            "slugLock": true,
            "synonyms": [{"term": "dev ops"}],
            "aliasSlugs": [{"slug": "dev_ops"}],
            "createdAt": "2025-08-20T03:30:43Z",
            "updatedAt": "2025-08-20T03:30:43Z"
        });

        let hashtag = Hashtag::from_value(&doc).unwrap();
        assert_eq!(hashtag.title, "DevOps");
        assert_eq!(hashtag.slug, "devops");
        assert_eq!(hashtag.synonyms, vec![Synonym::new("dev ops")]);
        assert_eq!(hashtag.alias_slugs, vec![AliasSlug::new("dev_ops")]);
        assert_eq!(hashtag.description, None);

        let back = hashtag.to_value().unwrap();
        assert_eq!(back["aliasSlugs"], doc["aliasSlugs"]);
        assert_eq!(back["slugLock"], json!(true));
    }

    #[test]
    fn test_missing_optionals_default() {
        let doc = json!({
            "id": "h1",
            "title": "ML",
            "createdAt": "2025-08-20T03:30:43Z",
            "updatedAt": "2025-08-20T03:30:43Z"
        });

        let hashtag = Hashtag::from_value(&doc).unwrap();
        assert_eq!(hashtag.slug, "");
        assert!(hashtag.slug_lock);
        assert!(hashtag.synonyms.is_empty());
        assert!(hashtag.alias_slugs.is_empty());
    }

    #[test]
    fn test_null_description_is_none() {
        let doc = json!({
            "id": "h1",
            "title": "ML",
            "description": null,
            "createdAt": "2025-08-20T03:30:43Z",
            "updatedAt": "2025-08-20T03:30:43Z"
        });

        let hashtag = Hashtag::from_value(&doc).unwrap();
        assert_eq!(hashtag.description, None);
    }
}
