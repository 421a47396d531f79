//! Document validation against a collection schema
//!
//! Runs after normalization hooks and before uniqueness checks.
//!
//! Rules:
//! - The document must be a JSON object
//! - Undeclared top-level fields are rejected ("id" is always
//!   permitted; "createdAt"/"updatedAt" when the collection has
//!   timestamps)
//! - Required fields must be present and non-null
//! - Present values must match the declared type exactly, no coercion
//! - Optional fields may be null (cleared)
//! - Array rows are validated as objects against the row schema; each
//!   row may also carry an "id"
//!
//! The validator never mutates documents and is deterministic.

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{CollectionSchema, FieldDef, FieldType};

/// Validates documents against a single collection schema.
pub struct DocumentValidator<'a> {
    schema: &'a CollectionSchema,
}

impl<'a> DocumentValidator<'a> {
    /// Creates a validator for the given schema.
    pub fn new(schema: &'a CollectionSchema) -> Self {
        Self { schema }
    }

    /// Validates a full document.
    pub fn validate(&self, document: &Value) -> SchemaResult<()> {
        let collection = &self.schema.slug;

        let doc = document.as_object().ok_or_else(|| {
            SchemaError::type_mismatch(collection, "$root", "object", json_type_name(document))
        })?;

        // Reject undeclared fields
        for key in doc.keys() {
            if self.is_builtin(key) {
                continue;
            }
            if self.schema.field(key).is_none() {
                return Err(SchemaError::unknown_field(collection, key));
            }
        }

        // Check declared fields in declaration order
        for field in &self.schema.fields {
            match doc.get(&field.name) {
                Some(Value::Null) | None => {
                    if field.required {
                        return Err(SchemaError::missing_field(collection, &field.name));
                    }
                }
                Some(value) => self.validate_value(value, field, &field.name)?,
            }
        }

        Ok(())
    }

    fn is_builtin(&self, key: &str) -> bool {
        key == "id" || (self.schema.timestamps && (key == "createdAt" || key == "updatedAt"))
    }

    fn validate_value(&self, value: &Value, field: &FieldDef, path: &str) -> SchemaResult<()> {
        let collection = &self.schema.slug;

        match &field.field_type {
            FieldType::Text => {
                if !value.is_string() {
                    return Err(SchemaError::type_mismatch(
                        collection,
                        path,
                        "string",
                        json_type_name(value),
                    ));
                }
            }
            FieldType::Bool => {
                if !value.is_boolean() {
                    return Err(SchemaError::type_mismatch(
                        collection,
                        path,
                        "bool",
                        json_type_name(value),
                    ));
                }
            }
            FieldType::Array { fields } => {
                let rows = value.as_array().ok_or_else(|| {
                    SchemaError::type_mismatch(collection, path, "array", json_type_name(value))
                })?;

                for (i, row) in rows.iter().enumerate() {
                    let row_path = format!("{}[{}]", path, i);
                    self.validate_row(row, fields, &row_path)?;
                }
            }
        }

        Ok(())
    }

    fn validate_row(&self, row: &Value, fields: &[FieldDef], path: &str) -> SchemaResult<()> {
        let collection = &self.schema.slug;

        let obj = row.as_object().ok_or_else(|| {
            SchemaError::type_mismatch(collection, path, "object", json_type_name(row))
        })?;

        for key in obj.keys() {
            if key == "id" {
                continue;
            }
            if !fields.iter().any(|f| &f.name == key) {
                return Err(SchemaError::unknown_field(
                    collection,
                    format!("{}.{}", path, key),
                ));
            }
        }

        for field in fields {
            let field_path = format!("{}.{}", path, field.name);
            match obj.get(&field.name) {
                Some(Value::Null) | None => {
                    if field.required {
                        return Err(SchemaError::missing_field(collection, field_path));
                    }
                }
                Some(value) => self.validate_value(value, field, &field_path)?,
            }
        }

        Ok(())
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
