//! Collection schema declarations and document validation
//!
//! A collection schema declares the fields of a content collection:
//! names, types, required/unique/indexed flags, and defaults. The
//! validator checks documents against a schema after normalization
//! hooks have run and before uniqueness checks.

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use types::{CollectionSchema, FieldDef, FieldType};
pub use validator::DocumentValidator;
