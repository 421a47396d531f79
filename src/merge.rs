//! Generic JSON deep merge
//!
//! Merge semantics:
//! - Object into object: recursive, key by key
//! - Anything else (arrays, scalars, null) replaces the target wholesale
//! - Merging into a non-object replaces it with the source
//!
//! Used by the update path to lay a partial draft over a stored
//! document before normalization runs.

use serde_json::Value;

/// Returns true for plain JSON objects (arrays are not objects here).
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

/// Deep merges `source` over `target`, returning the merged value.
///
/// Neither input is mutated.
pub fn deep_merge(target: &Value, source: &Value) -> Value {
    let (Some(target_map), Some(source_map)) = (target.as_object(), source.as_object()) else {
        return source.clone();
    };

    let mut output = target_map.clone();
    for (key, source_value) in source_map {
        if is_object(source_value) {
            match target_map.get(key) {
                Some(existing) => {
                    output.insert(key.clone(), deep_merge(existing, source_value));
                }
                None => {
                    output.insert(key.clone(), source_value.clone());
                }
            }
        } else {
            output.insert(key.clone(), source_value.clone());
        }
    }

    Value::Object(output)
}
