pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod models;
pub mod services;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, DatabaseLocation, ServerConfig};
use crate::core_state::CoreState;
use crate::db::DatabaseError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Cannot create data directory {path}: {source}")]
    DataDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Open the database, wire the services and serve the API until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    if let DatabaseLocation::File(path) = &config.database {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StartupError::DataDir {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }

    let core = Arc::new(CoreState::open(&config.database)?);
    let server = api::server::start_api_server_on(core, config.addr)
        .await
        .map_err(StartupError::Server)?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {e}");
    }

    server.stop().await;
    Ok(())
}
