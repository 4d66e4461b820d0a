//! Clinic Service Library
//!
//! Persistence and business rules of the polyclinic: SeaORM entities and
//! migrations, one repository per aggregate, the unit of work and the
//! services built on top of them.

pub mod infra;
pub mod repository;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

use common::DatabaseConfig;
use tracing::info;

use crate::infra::Database;

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    action: MigrateAction,
    config: &DatabaseConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
