//! DDL generation from collection schemas
//!
//! Layout mirrored by the generated SQL:
//! - Main table named after the collection, serial primary key,
//!   one column per scalar field (camelCase keys become snake_case
//!   columns), timestamp columns when the collection has them
//! - One child table per array field, named `<collection>_<field>`,
//!   with `_order`, `_parent_id`, a varchar row id, and one column
//!   per row field; `_parent_id` cascades on delete
//! - A unique index per unique field, a plain index per indexed
//!   field, order/parent indexes on child tables, and timestamp
//!   indexes on the main table
//!
//! Statement order is deterministic: child tables, main table,
//! foreign keys, child indexes, main indexes. Down drops the tables
//! (cascade), children first.

use crate::schema::{CollectionSchema, FieldDef, FieldType};
use serde_json::Value;

use super::errors::MigrateResult;
use super::Migration;

/// Generates the migration that creates a collection's tables.
pub fn create_collection(name: &str, schema: &CollectionSchema) -> MigrateResult<Migration> {
    schema.validate_structure()?;

    let table = &schema.slug;
    let mut up = Vec::new();
    let mut down = Vec::new();

    let array_fields: Vec<&FieldDef> = schema
        .fields
        .iter()
        .filter(|f| matches!(f.field_type, FieldType::Array { .. }))
        .collect();

    // Child tables first, in declaration order
    for field in &array_fields {
        let child = child_table(table, field);
        let FieldType::Array { fields } = &field.field_type else {
            continue;
        };

        let mut columns = vec![
            "\"_order\" integer NOT NULL".to_string(),
            "\"_parent_id\" integer NOT NULL".to_string(),
            "\"id\" varchar PRIMARY KEY NOT NULL".to_string(),
        ];
        for row_field in fields {
            columns.push(column_def(row_field));
        }
        up.push(create_table(&child, &columns));
    }

    // Main table
    let mut columns = vec!["\"id\" serial PRIMARY KEY NOT NULL".to_string()];
    for field in &schema.fields {
        if matches!(field.field_type, FieldType::Array { .. }) {
            continue;
        }
        columns.push(column_def(field));
    }
    if schema.timestamps {
        columns.push(
            "\"updated_at\" timestamp(3) with time zone DEFAULT now() NOT NULL".to_string(),
        );
        columns.push(
            "\"created_at\" timestamp(3) with time zone DEFAULT now() NOT NULL".to_string(),
        );
    }
    up.push(create_table(table, &columns));

    // Foreign keys from children to the main table
    for field in &array_fields {
        let child = child_table(table, field);
        up.push(format!(
            "ALTER TABLE \"{child}\" ADD CONSTRAINT \"{child}_parent_id_fk\" \
             FOREIGN KEY (\"_parent_id\") REFERENCES \"public\".\"{table}\"(\"id\") \
             ON DELETE cascade ON UPDATE no action;"
        ));
    }

    // Child order/parent indexes
    for field in &array_fields {
        let child = child_table(table, field);
        up.push(index(&child, "_order", &format!("{child}_order_idx"), false));
        up.push(index(
            &child,
            "_parent_id",
            &format!("{child}_parent_id_idx"),
            false,
        ));
    }

    // Main table indexes: unique fields, indexed fields, timestamps
    for field in &schema.fields {
        if matches!(field.field_type, FieldType::Array { .. }) {
            continue;
        }
        let column = snake_case(&field.name);
        if field.unique {
            up.push(index(
                table,
                &column,
                &format!("{table}_{column}_idx"),
                true,
            ));
        } else if field.indexed {
            up.push(index(
                table,
                &column,
                &format!("{table}_{column}_idx"),
                false,
            ));
        }
    }
    if schema.timestamps {
        up.push(index(
            table,
            "updated_at",
            &format!("{table}_updated_at_idx"),
            false,
        ));
        up.push(index(
            table,
            "created_at",
            &format!("{table}_created_at_idx"),
            false,
        ));
    }

    // Down: drop children first, then the main table
    for field in &array_fields {
        down.push(format!(
            "DROP TABLE \"{}\" CASCADE;",
            child_table(table, field)
        ));
    }
    down.push(format!("DROP TABLE \"{table}\" CASCADE;"));

    Ok(Migration {
        name: name.to_string(),
        up,
        down,
    })
}

fn child_table(table: &str, field: &FieldDef) -> String {
    format!("{}_{}", table, snake_case(&field.name))
}

fn create_table(table: &str, columns: &[String]) -> String {
    format!(
        "CREATE TABLE \"{}\" (\n  {}\n);",
        table,
        columns.join(",\n  ")
    )
}

fn index(table: &str, column: &str, name: &str, unique: bool) -> String {
    let kind = if unique { "CREATE UNIQUE INDEX" } else { "CREATE INDEX" };
    format!("{kind} \"{name}\" ON \"{table}\" USING btree (\"{column}\");")
}

fn column_def(field: &FieldDef) -> String {
    let column = snake_case(&field.name);
    let sql_type = match field.field_type {
        FieldType::Text => "varchar",
        FieldType::Bool => "boolean",
        // Callers filter array fields out before reaching here
        FieldType::Array { .. } => "varchar",
    };

    let mut def = format!("\"{column}\" {sql_type}");
    if let Some(default) = &field.default {
        def.push_str(&format!(" DEFAULT {}", sql_literal(default)));
    }
    if field.required {
        def.push_str(" NOT NULL");
    }
    def
}

fn sql_literal(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        other => format!("'{}'", other),
    }
}

/// camelCase document keys become snake_case column names.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
