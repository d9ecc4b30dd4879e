mod app;
mod assist;
mod config;
mod handlers;
mod state;
mod storage;
mod store;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todovault_core::storage::ObjectStore;

use crate::{app::create_app, assist::OpenAiGenerator, config::Config, state::AppState};

/// TodoVault - Track your todos, backed by object storage
#[derive(Parser, Debug)]
#[command(name = "todovault")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "4000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todovault=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let blobs = init_blob_store(&config).await;
    let generator = Arc::new(OpenAiGenerator::new(&config));

    let state = AppState::new(&config, blobs, generator);
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Initialize the blob store selected by the active storage feature.
#[cfg(feature = "s3")]
async fn init_blob_store(config: &Config) -> Arc<dyn ObjectStore> {
    tracing::info!(bucket = %config.bucket, key = %config.object_key, "Using S3 storage");
    Arc::new(crate::storage::S3BlobStore::from_env(config.bucket.clone()).await)
}

#[cfg(feature = "inmemory")]
async fn init_blob_store(config: &Config) -> Arc<dyn ObjectStore> {
    tracing::warn!(key = %config.object_key, "Using in-memory storage, todos will not survive restarts");
    Arc::new(crate::storage::InMemoryBlobStore::default())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
