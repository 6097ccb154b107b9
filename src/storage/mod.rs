mod repository;

pub use repository::*;

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Migrations in the order they must be applied, keyed by schema version.
pub const MIGRATIONS: &[(i64, &str)] = &[(1, MIGRATION_001_INITIAL)];

/// Schema version a fully migrated database reports.
pub const LATEST_SCHEMA_VERSION: i64 = 1;
