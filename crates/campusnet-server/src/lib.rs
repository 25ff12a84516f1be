//! CampusNet Server
//!
//! HTTP service exposing the campus social surface: accounts and sessions,
//! profiles and directory lookups, the relationship graph, posts with
//! comment threads and likes, announcements, and events.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod session;

use config::ServerConfig;
use handlers::{create_router, AppState};
use session::SessionManager;
use campusnet_store::DocumentDb;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] campusnet_store::StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server
///
/// Opens the document store, initializes session handling, and serves the
/// axum router until shutdown.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting CampusNet server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database path: {}", config.database_path);
    info!("Token expiry: {} seconds", config.token_expiry_secs);

    let sessions = Arc::new(SessionManager::new(
        &config.jwt_secret,
        config.token_expiry_secs,
    ));
    let db = Arc::new(Mutex::new(DocumentDb::open(&config.database_path)?));

    let state = AppState { sessions, db };
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.database_path, ":memory:");
        assert_eq!(config.token_expiry_secs, 3600);
    }
}
