//! `polyclinic` binary: serves the API and runs maintenance commands.

mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_service_lib::authenticator;
use clinic_service_lib::infra::{Database, Persistence};
use common::{DatabaseConfig, JwtConfig};
use gateway_lib::config::GatewayConfig;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = GatewayConfig::from_env()?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            info!("Starting polyclinic API on {}", config.bind_address());
            gateway_lib::serve(config).await?;
        }
        Commands::Migrate { action } => {
            let config = DatabaseConfig::from_env();
            clinic_service_lib::run_migrations(action.into(), &config).await?;
        }
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => {
            let db = Database::connect(&DatabaseConfig::from_env()).await?;
            let uow = Arc::new(Persistence::new(db.get_connection()));
            let auth = authenticator(uow, &JwtConfig::from_env()?);

            let admin = auth.create_admin(username, email, password).await?;
            println!("Administrator created: {} ({})", admin.username, admin.id);
        }
    }

    Ok(())
}
