//! MediCheck HTTP Server
//!
//! Exposes the interaction pipeline over HTTP.
//!
//! | route | purpose |
//! |---|---|
//! | `POST /analyze` | `{ drugs }` → `{ interactions, provenance }` |
//! | `POST /drug-info` | `{ drugName }` → drug monograph |
//! | `GET /search?term=` | catalog candidates |
//! | `GET /health` | liveness |
//!
//! Failures are rendered as `{ "error": "..." }`: 400 for invalid input,
//! 502 when the narrative source fails.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use medicheck_knowledge::KnowledgeBase;
use medicheck_pipeline::{build_orchestrator, ConfigError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server
///
/// Builds the curated knowledge base and the live pipeline once, then
/// serves until the process exits.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting MediCheck server");
    info!("Bind address: {}", config.bind_addr());

    let knowledge = Arc::new(KnowledgeBase::curated());
    let orchestrator = build_orchestrator(&config.service, knowledge)?;
    let app = create_router(AppState::new(orchestrator));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
