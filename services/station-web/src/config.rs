//! Station configuration loading.

use anyhow::{bail, Context, Result};
use std::path::Path;

use station_common::StationConfig;

/// Station definitions loaded from YAML files, one station per file.
#[derive(Debug, Clone, Default)]
pub struct StationsConfig {
    stations: Vec<StationConfig>,
}

impl StationsConfig {
    pub fn new(stations: Vec<StationConfig>) -> Result<Self> {
        let mut config = Self::default();
        for station in stations {
            config.insert(station)?;
        }
        Ok(config)
    }

    /// Load configuration from a directory of YAML files.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref();

        // If directory doesn't exist, return an empty config
        if !path.exists() {
            tracing::warn!(
                "Station config directory {} does not exist, no stations configured",
                path.display()
            );
            return Ok(Self::default());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)
            .with_context(|| format!("Failed to read directory: {}", path.display()))?
        {
            let file_path = entry?.path();
            if let Some(ext) = file_path.extension() {
                if ext == "yaml" || ext == "yml" {
                    files.push(file_path);
                }
            }
        }
        files.sort();

        let mut config = Self::default();
        for file_path in files {
            let content = std::fs::read_to_string(&file_path)
                .with_context(|| format!("Failed to read: {:?}", file_path))?;

            let station: StationConfig = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse: {:?}", file_path))?;

            config
                .insert(station)
                .with_context(|| format!("Invalid station config: {:?}", file_path))?;
        }

        tracing::info!(
            "Loaded {} stations from {}",
            config.stations.len(),
            path.display()
        );

        Ok(config)
    }

    fn insert(&mut self, station: StationConfig) -> Result<()> {
        station.validate()?;
        if self.find(&station.id).is_some() {
            bail!("duplicate station id '{}'", station.id);
        }
        self.stations.push(station);
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&StationConfig> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[StationConfig] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
