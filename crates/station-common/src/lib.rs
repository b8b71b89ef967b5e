//! Common types and utilities shared across the station monitor crates.

pub mod error;
pub mod kind;
pub mod station;
pub mod time;

pub use error::{StationError, StationResult};
pub use kind::InstrumentKind;
pub use station::{
    validate_identifier, ArchiveSettings, MapView, StationConfig, StationVariant,
    DEFAULT_GPS_LIMIT,
};
pub use time::{display_time, format_idate, parse_idate, resolve_idate, ArchiveWindow, TimeParseError};
