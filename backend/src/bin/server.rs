//! ITR norms HTTP server binary.
//!
//! Loads the configuration, opens the document repository, builds the first
//! norms snapshot and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Serve the documents in ./data
//! cargo run --bin itr-server
//!
//! # Explicit configuration and data directory
//! ITR_CONFIG=/etc/itr-norms.toml ITR_DATA_DIR=/srv/norms cargo run --bin itr-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `ITR_CONFIG`: Path to `itr-norms.toml` (default: searched)
//! - `ITR_DATA_DIR`: Documents directory when the config names none (default: data)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use itr_norms::db::{RepositoryConfig, RepositoryFactory};
use itr_norms::http::{create_router, AppState};
use itr_norms::services::SnapshotStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting ITR norms server");

    let config = RepositoryConfig::load()?;
    let repository = RepositoryFactory::from_config(&config)?;
    info!("Repository initialized ({})", config.repository.repo_type);

    let snapshots = SnapshotStore::load(repository.as_ref(), config.calculator.clone()).await?;
    let snapshot = snapshots.current();
    info!(
        "Serving norms snapshot {} ({} coefficients, data period: {})",
        snapshot.version,
        snapshot.coefficients.len(),
        snapshot.calculator_config.metadata.data_period
    );

    let state = AppState::new(repository, snapshots);
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
