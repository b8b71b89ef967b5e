//! Application state for the station web service.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use storage::{Catalog, MemorySource, ReadingSource};

use crate::config::StationsConfig;

/// Shared application state.
///
/// Holds configuration and the reading source only. Readings are fetched
/// and decoded per request and never cached here.
pub struct AppState {
    /// Where instrument rows come from.
    pub source: Arc<dyn ReadingSource>,

    /// Configured stations.
    pub stations: StationsConfig,

    /// Root directory of archive images and galleries.
    pub image_root: PathBuf,

    /// Prometheus exporter handle, when a recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn ReadingSource>,
        stations: StationsConfig,
        image_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            stations,
            image_root: image_root.into(),
            prometheus: None,
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// Create state from environment configuration.
    ///
    /// `DATABASE_URL` selects PostgreSQL; without it the service runs on an
    /// empty in-memory source and every station reports missing readings.
    pub async fn from_env(config_dir: &Path, image_root: &Path) -> Result<Self> {
        let stations = StationsConfig::load_from_dir(config_dir)?;

        let source: Arc<dyn ReadingSource> = match std::env::var("DATABASE_URL") {
            Ok(database_url) => {
                let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10);
                let catalog = Catalog::connect(&database_url, max_connections)
                    .await
                    .context("Failed to connect to database")?;
                info!(max_connections, "Connected to PostgreSQL reading source");
                Arc::new(catalog)
            }
            Err(_) => {
                warn!("DATABASE_URL not set, using empty in-memory reading source");
                Arc::new(MemorySource::new())
            }
        };

        Ok(Self::new(source, stations, image_root))
    }
}
