//! `satlog` server binary.

use std::path::PathBuf;

use axum::{ServiceExt, extract::Request};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use satlog::{
    api,
    config::Config,
    runtime::handle::spawn_telemetry,
    service::TelemetryService,
};

#[derive(Debug, Parser)]
#[command(name = "satlog", version, about = "Spacecraft telemetry record store")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Listen address, overrides `server.bind`.
    #[arg(long)]
    bind: Option<String>,
    /// SQLite database file, overrides `store.path`.
    #[arg(long)]
    db: Option<PathBuf>,
    /// Keep all data in memory.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("satlog=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(db) = cli.db {
        config.store.path = db;
    }
    config.store.in_memory |= cli.in_memory;

    let store = config.store.open()?;
    info!(
        path = %config.store.path.display(),
        in_memory = config.store.in_memory,
        "telemetry store opened"
    );

    let handle = spawn_telemetry(TelemetryService::new(store), config.runtime.clone());
    let app = api::app(handle.clone());

    let listener = TcpListener::bind(&config.server.bind).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    handle.shutdown().await?;
    Ok(())
}
