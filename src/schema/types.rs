//! Collection and field declarations
//!
//! Field names use the document (camelCase) spelling; the migration
//! generator converts them to snake_case column names. Field order is
//! declaration order and is preserved, so generated DDL and
//! validation error ordering are deterministic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};

/// Supported field types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 text
    Text,
    /// Boolean
    Bool,
    /// Ordered rows, each an object with its own field schema
    Array {
        /// Row field definitions
        fields: Vec<FieldDef>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "string",
            FieldType::Bool => "bool",
            FieldType::Array { .. } => "array",
        }
    }
}

/// A single field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Document key (camelCase)
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether the field must be present on every document
    #[serde(default)]
    pub required: bool,
    /// Whether the backing store must reject duplicate values
    #[serde(default)]
    pub unique: bool,
    /// Whether the generated schema carries a plain index
    #[serde(default)]
    pub indexed: bool,
    /// Value applied when the field is absent from a draft
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldDef {
    /// Declare a text field
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Text,
            required: false,
            unique: false,
            indexed: false,
            default: None,
        }
    }

    /// Declare a boolean field
    pub fn bool(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Bool,
            required: false,
            unique: false,
            indexed: false,
            default: None,
        }
    }

    /// Declare an array-of-rows field
    pub fn array(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Array { fields },
            required: false,
            unique: false,
            indexed: false,
            default: None,
        }
    }

    /// Marks the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as unique (store-enforced)
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks the field as indexed
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Sets the default value applied to drafts missing the field
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// A complete collection declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Collection identifier (also the main table name)
    pub slug: String,
    /// Field declarations in document order
    pub fields: Vec<FieldDef>,
    /// Whether the collection carries createdAt/updatedAt columns
    pub timestamps: bool,
}

impl CollectionSchema {
    /// Create a collection with timestamps enabled
    pub fn new(slug: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            slug: slug.into(),
            fields,
            timestamps: true,
        }
    }

    /// Looks up a field declaration by document key
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the fields the store must keep unique
    pub fn unique_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.unique)
    }

    /// Validates the declaration itself (not a document)
    pub fn validate_structure(&self) -> SchemaResult<()> {
        if self.slug.is_empty() {
            return Err(SchemaError::invalid_structure(
                &self.slug,
                "collection slug must be non-empty",
            ));
        }

        check_fields(&self.slug, &self.fields)?;

        for field in &self.fields {
            if field.unique {
                if let FieldType::Array { .. } = field.field_type {
                    return Err(SchemaError::invalid_structure(
                        &self.slug,
                        format!("array field '{}' cannot be unique", field.name),
                    ));
                }
            }
            if let FieldType::Array { fields } = &field.field_type {
                if fields.is_empty() {
                    return Err(SchemaError::invalid_structure(
                        &self.slug,
                        format!("array field '{}' declares no row fields", field.name),
                    ));
                }
                check_fields(&self.slug, fields)?;
            }
        }

        Ok(())
    }
}

/// Rejects duplicate or empty field names within one level.
fn check_fields(collection: &str, fields: &[FieldDef]) -> SchemaResult<()> {
    for (i, field) in fields.iter().enumerate() {
        if field.name.is_empty() {
            return Err(SchemaError::invalid_structure(
                collection,
                "field name must be non-empty",
            ));
        }
        if fields[..i].iter().any(|f| f.name == field.name) {
            return Err(SchemaError::invalid_structure(
                collection,
                format!("duplicate field '{}'", field.name),
            ));
        }
    }
    Ok(())
}
