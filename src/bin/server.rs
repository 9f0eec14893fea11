//! Recipebox Document Server
//!
//! Serves recipes and meal plans to `recipebox` clients from a directory of
//! JSON documents.
//!
//! # Configuration
//!
//! Environment variables:
//! - `RECIPEBOX_PORT`: Port to listen on (default: 8080)
//! - `RECIPEBOX_DATA_DIR`: Directory to store documents (default: ~/.local/share/recipebox-server)
//! - `RECIPEBOX_API_KEY`: Shared bearer key for collection routes (default: none, routes are open)

use recipebox::server;
use recipebox_core::FileStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Server configuration
#[derive(Debug, Clone)]
struct Config {
    /// Port to listen on
    port: u16,
    /// Directory to store documents
    data_dir: PathBuf,
    /// Shared bearer key
    api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let port = std::env::var("RECIPEBOX_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let data_dir = std::env::var("RECIPEBOX_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("recipebox-server")
            });

        let api_key = std::env::var("RECIPEBOX_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        Self {
            port,
            data_dir,
            api_key,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipebox_server=info,recipebox=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if let Err(e) = std::fs::create_dir_all(&config.data_dir) {
        tracing::error!("Failed to create data directory: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Data directory: {}", config.data_dir.display());

    let app = server::router(FileStore::new(&config.data_dir), config.api_key);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
