//! HTTP API for the polyclinic backend.
//!
//! Handlers call the clinic and auth services in-process; every route except
//! health, register and login requires a bearer token.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use auth_service_lib::authenticator;
use clinic_service_lib::infra::{Database, Persistence};

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::{AppState, Services};

/// Connect to the database, apply migrations and serve the API.
pub async fn serve(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let uow = Arc::new(Persistence::new(db.get_connection()));

    let auth = authenticator(uow.clone(), &config.jwt);
    let services = Services::new(uow, auth);

    let addr: SocketAddr = config.bind_address().parse()?;
    let app = create_router(AppState::new(services, config));

    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
