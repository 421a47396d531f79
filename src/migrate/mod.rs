//! Schema-mirroring SQL migrations
//!
//! Migrations are generated from collection schemas rather than
//! written by hand, so the DDL always mirrors the declared content
//! model: a main table per collection, a child table per array field,
//! and indexes for unique/indexed/timestamp columns.
//!
//! The registry keeps migrations in a strictly ascending,
//! timestamp-named order. Nothing here executes SQL; running the
//! statements is the job of an external migration runner.

mod errors;
mod generator;

pub use errors::{MigrateError, MigrateResult};
pub use generator::create_collection;

/// A single migration: ordered up statements and the down statements
/// that revert them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Timestamped name, `YYYYMMDD_HHMMSS`
    pub name: String,
    /// Statements applied in order
    pub up: Vec<String>,
    /// Statements reverting the migration, in order
    pub down: Vec<String>,
}

/// Ordered collection of migrations.
#[derive(Debug, Default)]
pub struct MigrationRegistry {
    migrations: Vec<Migration>,
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a migration. Names must be well-formed and strictly
    /// ascending; duplicates are rejected.
    pub fn push(&mut self, migration: Migration) -> MigrateResult<()> {
        if !well_formed_name(&migration.name) {
            return Err(MigrateError::BadName(migration.name));
        }
        if let Some(last) = self.migrations.last() {
            if migration.name == last.name {
                return Err(MigrateError::Duplicate(migration.name));
            }
            if migration.name < last.name {
                return Err(MigrateError::OutOfOrder {
                    name: migration.name,
                    previous: last.name.clone(),
                });
            }
        }
        self.migrations.push(migration);
        Ok(())
    }

    /// Migration names in application order.
    pub fn names(&self) -> Vec<&str> {
        self.migrations.iter().map(|m| m.name.as_str()).collect()
    }

    /// Iterates migrations in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Migration> {
        self.migrations.iter()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}

/// `YYYYMMDD_HHMMSS`
fn well_formed_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() == 15
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[8] == b'_'
        && bytes[9..].iter().all(u8::is_ascii_digit)
}
