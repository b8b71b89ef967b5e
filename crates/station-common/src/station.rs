//! Station definitions.
//!
//! A station is a physical monitoring deployment with a fixed subset of
//! instrument kinds, a map viewport and an archive date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{StationError, StationResult};
use crate::kind::InstrumentKind;
use crate::time::ArchiveWindow;

/// Default number of GPS fixes fetched for the map track.
pub const DEFAULT_GPS_LIMIT: usize = 400;

/// Instrument profile of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationVariant {
    /// Ferry-mounted water-quality package: wind, GPS, flow-through and sonde.
    WaterQuality,
    /// Vertical profiler with depth sounder: wind, GPS and depth.
    Profiler,
}

impl StationVariant {
    /// Kinds populated for this variant, in encoder order.
    pub fn kinds(&self) -> &'static [InstrumentKind] {
        match self {
            StationVariant::WaterQuality => &[
                InstrumentKind::Wind,
                InstrumentKind::Gps,
                InstrumentKind::Flow,
                InstrumentKind::Sonde,
            ],
            StationVariant::Profiler => &[
                InstrumentKind::Wind,
                InstrumentKind::Gps,
                InstrumentKind::Depth,
            ],
        }
    }

    pub fn has(&self, kind: InstrumentKind) -> bool {
        self.kinds().contains(&kind)
    }

    /// Whether wind speeds are shown in mph alongside knots.
    pub fn shows_mph(&self) -> bool {
        matches!(self, StationVariant::WaterQuality)
    }
}

/// Fixed map viewport. The map is never auto-fit to the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
}

/// Archive image and gallery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveSettings {
    /// Folder (relative to the image root) holding daily profile images.
    #[serde(default)]
    pub image_folder: String,

    /// Filename prefix for daily profile images.
    #[serde(default)]
    pub file_prefix: String,

    pub first_data: NaiveDate,

    /// Absent while the deployment is ongoing.
    #[serde(default)]
    pub last_data: Option<NaiveDate>,

    /// Folder (relative to the image root) holding per-day photo sets.
    #[serde(default)]
    pub gallery_dir: Option<String>,
}

impl ArchiveSettings {
    pub fn window(&self) -> ArchiveWindow {
        ArchiveWindow::new(self.first_data, self.last_data)
    }
}

/// A configured station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    /// URL identifier.
    pub id: String,

    /// Page title.
    #[serde(default)]
    pub title: String,

    /// Prefix of the instrument tables (`{prefix}_wind`, `{prefix}_gps`, ...).
    pub table_prefix: String,

    pub variant: StationVariant,

    /// Row limit for the GPS track.
    #[serde(default = "default_gps_limit")]
    pub gps_limit: usize,

    pub map: MapView,

    pub archive: ArchiveSettings,
}

fn default_gps_limit() -> usize {
    DEFAULT_GPS_LIMIT
}

impl StationConfig {
    /// Kinds populated at this station.
    pub fn kinds(&self) -> &'static [InstrumentKind] {
        self.variant.kinds()
    }

    /// Number of rows to fetch for `kind`.
    pub fn row_limit(&self, kind: InstrumentKind) -> usize {
        match kind {
            InstrumentKind::Gps => self.gps_limit,
            _ => 1,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> StationResult<()> {
        validate_identifier(&self.id)?;
        validate_identifier(&self.table_prefix)?;

        if self.gps_limit == 0 {
            return Err(StationError::ConfigError(format!(
                "station {}: gps_limit must be at least 1",
                self.id
            )));
        }

        if let Some(last) = self.archive.last_data {
            if last < self.archive.first_data {
                return Err(StationError::ConfigError(format!(
                    "station {}: last_data {} precedes first_data {}",
                    self.id, last, self.archive.first_data
                )));
            }
        }

        if !(-90.0..=90.0).contains(&self.map.lat) || !(-180.0..=180.0).contains(&self.map.lon) {
            return Err(StationError::ConfigError(format!(
                "station {}: map center out of range",
                self.id
            )));
        }

        Ok(())
    }
}

/// Check that `s` is safe to splice into SQL as an identifier:
/// ASCII letters, digits and underscores, not starting with a digit.
pub fn validate_identifier(s: &str) -> StationResult<()> {
    let mut chars = s.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid && s.len() <= 63 {
        Ok(())
    } else {
        Err(StationError::InvalidIdentifier(s.to_string()))
    }
}
