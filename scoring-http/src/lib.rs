//! Scoring HTTP API Server
//!
//! REST transport over [`scoring_core::ModelService`]: deploy, list,
//! inspect, evaluate and undeploy models under `/api/v1`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

use server::{ServerConfig, start_server};
use tracing_subscriber::EnvFilter;

/// Start the server with the default configuration
pub async fn start() -> Result<(), Box<dyn std::error::Error>> {
    start_with_config(ServerConfig::default()).await
}

/// Start the server with a custom configuration
pub async fn start_with_config(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    start_server(config).await
}
