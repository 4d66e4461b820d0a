//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240601_000001_create_identity_tables;
mod m20240601_000002_create_clinical_tables;
mod m20240601_000003_create_consultation_tables;
mod m20240601_000004_create_emergency_tables;
mod m20240601_000005_create_medication_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_identity_tables::Migration),
            Box::new(m20240601_000002_create_clinical_tables::Migration),
            Box::new(m20240601_000003_create_consultation_tables::Migration),
            Box::new(m20240601_000004_create_emergency_tables::Migration),
            Box::new(m20240601_000005_create_medication_tables::Migration),
        ]
    }
}
