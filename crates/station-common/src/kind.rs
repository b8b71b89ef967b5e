//! Instrument kinds and their wire attribute sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category of reading produced by a distinct sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    Wind,
    Gps,
    Flow,
    Sonde,
    Depth,
}

const WIND_ATTRIBUTES: &[&str] = &[
    "sample_time",
    "speed_scalar",
    "dir_unit_vector",
    "speed_std",
    "speed_vector",
    "dir_vector",
    "gust_speed",
    "gust_dir",
    "gust_time",
];

const GPS_ATTRIBUTES: &[&str] = &["sample_time", "lat", "lon", "speed", "track"];

const FLOW_ATTRIBUTES: &[&str] = &["cast_time", "flow_rate"];

const SONDE_ATTRIBUTES: &[&str] = &[
    "sample_time",
    "tempc",
    "salppt",
    "dissolved_o2",
    "turbid",
    "chl",
    "ph",
];

const DEPTH_ATTRIBUTES: &[&str] = &[
    "sample_time",
    "working_depth",
    "calculated_depth",
    "calculated_depth_std",
    "num_good_pings",
    "temp_c",
];

impl InstrumentKind {
    /// All kinds in encoder order.
    pub const ALL: [InstrumentKind; 5] = [
        InstrumentKind::Wind,
        InstrumentKind::Gps,
        InstrumentKind::Flow,
        InstrumentKind::Sonde,
        InstrumentKind::Depth,
    ];

    /// Element tag used on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            InstrumentKind::Wind => "wind",
            InstrumentKind::Gps => "gps",
            InstrumentKind::Flow => "flow",
            InstrumentKind::Sonde => "sonde",
            InstrumentKind::Depth => "depth",
        }
    }

    /// Look up a kind by its wire tag. Tags are matched exactly.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    /// Attribute names consumed for this kind. Renaming any of these is a
    /// breaking wire change.
    pub fn attributes(&self) -> &'static [&'static str] {
        match self {
            InstrumentKind::Wind => WIND_ATTRIBUTES,
            InstrumentKind::Gps => GPS_ATTRIBUTES,
            InstrumentKind::Flow => FLOW_ATTRIBUTES,
            InstrumentKind::Sonde => SONDE_ATTRIBUTES,
            InstrumentKind::Depth => DEPTH_ATTRIBUTES,
        }
    }

    /// Timestamp column used to order rows newest-first.
    pub fn time_attribute(&self) -> &'static str {
        match self {
            InstrumentKind::Flow => "cast_time",
            _ => "sample_time",
        }
    }

    /// Suffix of the backing table, appended to a station's table prefix.
    pub fn table_suffix(&self) -> &'static str {
        match self {
            InstrumentKind::Flow => "cast",
            other => other.tag(),
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for InstrumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("unknown instrument kind: {}", s))
    }
}
