//! Gateway configuration.

use std::env;

use common::{AppResult, DatabaseConfig, JwtConfig};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails when the JWT settings are missing or too weak.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("GATEWAY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env()?,
        })
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
