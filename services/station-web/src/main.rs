//! Station Web Server
//!
//! Latest-readings pages for unattended water monitoring stations.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use station_web::build_router;
use station_web::state::AppState;

/// Station Web Server
#[derive(Parser, Debug)]
#[command(name = "station-web")]
#[command(about = "Latest readings, GPS track and archive for monitoring stations")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "STATION_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Directory of station YAML files
    #[arg(long, default_value = "config/stations", env = "STATION_CONFIG_DIR")]
    config_dir: PathBuf,

    /// Root directory of archive images and galleries
    #[arg(long, default_value = "images", env = "STATION_IMAGE_ROOT")]
    image_root: PathBuf,

    /// Number of worker threads
    #[arg(long, env = "STATION_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting station web server");

    let state = AppState::from_env(&args.config_dir, &args.image_root)
        .await
        .context("Failed to initialize application state")?
        .with_prometheus(prometheus_handle);

    info!(
        stations = state.stations.len(),
        source = state.source.name(),
        image_root = %args.image_root.display(),
        "Application state ready"
    );

    let app = build_router(Arc::new(state));

    let addr: SocketAddr = args.listen.parse().context("Invalid listen address")?;
    info!("Station web listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
