//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Polyclinic backend: HTTP API, migrations and administration.
#[derive(Parser, Debug)]
#[command(name = "polyclinic")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, env = "GATEWAY_HOST")]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long, env = "GATEWAY_PORT")]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Create an administrator account
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Read from the environment when omitted on the command line
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateAction> for clinic_service_lib::MigrateAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => Self::Up,
            MigrateAction::Down => Self::Down,
            MigrateAction::Status => Self::Status,
            MigrateAction::Fresh => Self::Fresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_migrate_and_create_admin() {
        let cli = Cli::parse_from(["polyclinic", "migrate", "fresh"]);
        assert!(matches!(
            cli.command,
            Commands::Migrate {
                action: MigrateAction::Fresh
            }
        ));

        let cli = Cli::parse_from([
            "polyclinic",
            "create-admin",
            "--username",
            "admin",
            "--email",
            "admin@polyclinic.local",
            "--password",
            "una-clave-segura",
        ]);
        match cli.command {
            Commands::CreateAdmin { username, .. } => assert_eq!(username, "admin"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
