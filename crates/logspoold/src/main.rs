//! logspool daemon entry point

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use logspoold::{Cli, FileAdapter};
use logspool_runtime::DockerRuntime;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logspoold=info,logspool_logs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("logspoold starting...");

    let config = cli.into_config()?;
    let runtime = Arc::new(DockerRuntime::connect(&config.endpoint).await?);
    info!("Connected to container runtime at {}", config.endpoint);

    let adapter = FileAdapter::new(runtime, config).await?;
    info!(
        "Shipping container logs under {}",
        adapter.config().root.display()
    );

    // Set up signal handlers
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;

    let result = tokio::select! {
        result = adapter.run() => {
            if let Err(e) = &result {
                error!("Adapter error: {}", e);
            }
            result
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down...");
            Ok(())
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down...");
            Ok(())
        }
    };

    adapter.shutdown();
    result?;

    info!("Shutdown complete");
    Ok(())
}
