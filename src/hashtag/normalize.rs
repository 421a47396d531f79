//! Pre-validation draft normalization
//!
//! Pure, in-memory phase of the write pipeline. Permissive by design:
//! fields of the wrong shape are skipped, never an error. The draft
//! is a JSON object; non-object drafts pass through untouched and are
//! rejected later by schema validation.
//!
//! Steps, in order:
//! 1. Strip a leading `#` from the title and trim it
//! 2. Derive the slug from the title when absent or empty, otherwise
//!    renormalize the supplied slug
//! 3. Clean synonym terms, drop empties, dedupe case-insensitively
//!    keeping first-occurrence order
//! 4. Derive aliasSlugs as the ordered set of slugified synonym
//!    terms, excluding empties and the record's own slug
//! 5. When synonyms is absent or not an array, clear aliasSlugs (only
//!    if the field exists on the draft)

use std::collections::HashSet;

use serde_json::{json, Value};

use crate::slug;

/// Normalizes a draft in place. Never fails and never touches a store.
pub fn prepare_draft(draft: &mut Value) {
    let Some(map) = draft.as_object_mut() else {
        return;
    };

    // Step 1: title display cleanup
    if let Some(Value::String(title)) = map.get("title") {
        let cleaned = slug::clean_display(title);
        map.insert("title".to_string(), Value::String(cleaned));
    }

    // Step 2: derive or renormalize the slug
    let slug_empty = match map.get("slug") {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };
    if slug_empty {
        if let Some(Value::String(title)) = map.get("title") {
            let derived = slug::normalize_token(title);
            map.insert("slug".to_string(), Value::String(derived));
        }
    } else if let Some(Value::String(supplied)) = map.get("slug") {
        let renormalized = slug::normalize_token(supplied);
        map.insert("slug".to_string(), Value::String(renormalized));
    }

    // Steps 3-5: synonyms and derived aliases
    match map.get("synonyms").cloned() {
        Some(Value::Array(rows)) => {
            let mut terms: Vec<String> = Vec::new();
            let mut seen: HashSet<String> = HashSet::new();
            for row in &rows {
                let Some(term) = row.get("term").and_then(Value::as_str) else {
                    continue;
                };
                let cleaned = slug::clean_display(term);
                if cleaned.is_empty() {
                    continue;
                }
                if !seen.insert(cleaned.to_lowercase()) {
                    continue;
                }
                terms.push(cleaned);
            }

            // Ordered set of alias slugs, own slug excluded
            let own_slug = map
                .get("slug")
                .and_then(Value::as_str)
                .map(str::to_string);
            let mut aliases: Vec<String> = Vec::new();
            let mut alias_seen: HashSet<String> = HashSet::new();
            for term in &terms {
                let token = slug::normalize_token(term);
                if token.is_empty() {
                    continue;
                }
                if own_slug.as_deref() == Some(token.as_str()) {
                    continue;
                }
                if !alias_seen.insert(token.clone()) {
                    continue;
                }
                aliases.push(token);
            }

            let synonyms: Vec<Value> = terms.iter().map(|t| json!({ "term": t })).collect();
            let alias_rows: Vec<Value> = aliases.iter().map(|s| json!({ "slug": s })).collect();
            map.insert("synonyms".to_string(), Value::Array(synonyms));
            map.insert("aliasSlugs".to_string(), Value::Array(alias_rows));
        }
        _ => {
            // Synonyms removed or malformed: aliases must not survive
            if map.contains_key("aliasSlugs") {
                map.insert("aliasSlugs".to_string(), Value::Array(Vec::new()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_hash_stripped_and_trimmed() {
        let mut draft = json!({"title": " #DevOps "});
        prepare_draft(&mut draft);
        assert_eq!(draft["title"], json!("DevOps"));
    }

    #[test]
    fn test_slug_derived_from_title() {
        let mut draft = json!({"title": "#Machine Learning"});
        prepare_draft(&mut draft);
        assert_eq!(draft["slug"], json!("machine_learning"));
    }

    #[test]
    fn test_supplied_slug_renormalized() {
        let mut draft = json!({"title": "DevOps", "slug": "#Dev Ops!"});
        prepare_draft(&mut draft);
        assert_eq!(draft["slug"], json!("dev_ops"));
    }

    #[test]
    fn test_empty_slug_treated_as_absent() {
        let mut draft = json!({"title": "DevOps", "slug": ""});
        prepare_draft(&mut draft);
        assert_eq!(draft["slug"], json!("devops"));
    }

    #[test]
    fn test_non_string_title_and_slug_skipped() {
        let mut draft = json!({"title": 42, "slug": 13});
        prepare_draft(&mut draft);
        assert_eq!(draft["title"], json!(42));
        assert_eq!(draft["slug"], json!(13));
    }

    #[test]
    fn test_synonyms_cleaned_and_deduped_case_insensitively() {
        let mut draft = json!({
            "title": "DevOps",
            "synonyms": [
                {"term": "DevOps"},
                {"term": "devops"},
                {"term": "#DevOps "},
                {"term": "  "},
                {"term": "SRE"},
                null,
                {"term": 3}
            ]
        });
        prepare_draft(&mut draft);
        assert_eq!(
            draft["synonyms"],
            json!([{"term": "DevOps"}, {"term": "SRE"}])
        );
    }

    #[test]
    fn test_alias_excludes_own_slug() {
        let mut draft = json!({
            "title": "DevOps",
            "synonyms": [{"term": "DevOps"}]
        });
        prepare_draft(&mut draft);
        // The only synonym slugifies to the primary slug
        assert_eq!(draft["aliasSlugs"], json!([]));
    }

    #[test]
    fn test_alias_slugs_deduped_in_insertion_order() {
        let mut draft = json!({
            "title": "Networking",
            "synonyms": [
                {"term": "net working"},
                {"term": "Net  Working"},
                {"term": "infra"}
            ]
        });
        prepare_draft(&mut draft);
        // Both spellings survive the case-insensitive synonym dedupe
        // but slugify identically
        assert_eq!(
            draft["synonyms"],
            json!([{"term": "net working"}, {"term": "Net  Working"}, {"term": "infra"}])
        );
        assert_eq!(
            draft["aliasSlugs"],
            json!([{"slug": "net_working"}, {"slug": "infra"}])
        );
    }

    #[test]
    fn test_missing_synonyms_clears_existing_aliases() {
        let mut draft = json!({
            "title": "DevOps",
            "aliasSlugs": [{"slug": "stale"}]
        });
        prepare_draft(&mut draft);
        assert_eq!(draft["aliasSlugs"], json!([]));
    }

    #[test]
    fn test_missing_synonyms_without_alias_field_adds_nothing() {
        let mut draft = json!({"title": "DevOps"});
        prepare_draft(&mut draft);
        assert!(draft.get("aliasSlugs").is_none());
    }

    #[test]
    fn test_non_array_synonyms_clears_aliases() {
        let mut draft = json!({
            "title": "DevOps",
            "synonyms": "not an array",
            "aliasSlugs": [{"slug": "stale"}]
        });
        prepare_draft(&mut draft);
        assert_eq!(draft["aliasSlugs"], json!([]));
        assert_eq!(draft["synonyms"], json!("not an array"));
    }

    #[test]
    fn test_non_object_draft_untouched() {
        let mut draft = json!("nope");
        prepare_draft(&mut draft);
        assert_eq!(draft, json!("nope"));
    }

    #[test]
    fn test_catholicism_end_to_end() {
        let mut draft = json!({
            "title": "#Catholicism",
            "synonyms": [
                {"term": "catholic faith"},
                {"term": "Catholicism"}
            ]
        });
        prepare_draft(&mut draft);

        assert_eq!(draft["title"], json!("Catholicism"));
        assert_eq!(draft["slug"], json!("catholicism"));
        // Both synonyms differ case-insensitively, so both survive
        assert_eq!(
            draft["synonyms"],
            json!([{"term": "catholic faith"}, {"term": "Catholicism"}])
        );
        // "Catholicism" slugifies to the primary slug and is excluded
        assert_eq!(draft["aliasSlugs"], json!([{"slug": "catholic_faith"}]));
    }

    #[test]
    fn test_idempotent_on_prepared_drafts() {
        let mut draft = json!({
            "title": "#Catholicism",
            "synonyms": [{"term": "catholic faith"}, {"term": "Catholicism"}]
        });
        prepare_draft(&mut draft);
        let once = draft.clone();
        prepare_draft(&mut draft);
        assert_eq!(draft, once);
    }
}
