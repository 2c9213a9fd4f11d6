//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_accounting_schema;
pub(crate) mod m20260301_000002_project_analytics;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_accounting_schema::Migration),
            Box::new(m20260301_000002_project_analytics::Migration),
        ]
    }
}
