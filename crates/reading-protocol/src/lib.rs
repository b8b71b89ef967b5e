//! Station reading protocol.
//!
//! This crate defines the contract between the data-source side of the
//! station monitor and everything that displays readings:
//!
//! - [`payload`]: the versioned wire payload, a flat list of tagged elements
//!   carrying string attributes
//! - [`records`]: typed reading records, one per instrument kind
//! - [`decode`]: payload to an immutable [`StationSnapshot`]
//! - [`derive`]: unit conversions and display formatting
//! - [`archive`]: archive image naming
//!
//! # Example
//!
//! ```rust
//! use reading_protocol::{decode, derive, Element, InstrumentKind, Payload};
//!
//! let payload = Payload::new("cherrybranch").with_element(
//!     Element::new(InstrumentKind::Wind)
//!         .with_attr("speed_scalar", "5.0")
//!         .with_attr("dir_unit_vector", "354"),
//! );
//!
//! let decoded = decode(&payload, &[InstrumentKind::Wind]);
//! let wind = decoded.snapshot.latest_wind().unwrap();
//! let summary = derive::derive_wind(wind);
//! assert_eq!(summary.compass, Ok("N"));
//! ```

pub mod archive;
pub mod decode;
pub mod derive;
pub mod errors;
pub mod payload;
pub mod records;

pub use station_common::InstrumentKind;

pub use archive::{archive_image_name, archive_image_path, image_missing_message};
pub use decode::{decode, DecodeReport, Decoded, StationSnapshot};
pub use errors::{ProtocolError, ProtocolResult};
pub use payload::{Element, Payload, PAYLOAD_VERSION};
pub use records::{
    DepthReading, Field, FieldError, FlowReading, GpsReading, Reading, SondeReading, WindReading,
};

/// Media types used for station responses.
pub mod media_types {
    /// Reading payload media type.
    pub const READINGS_JSON: &str = "application/json";
    /// Rendered station page.
    pub const HTML: &str = "text/html; charset=utf-8";
    /// Plain-text table.
    pub const TEXT: &str = "text/plain; charset=utf-8";
}
