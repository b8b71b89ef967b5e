//! Typed reading records.
//!
//! Records are built once from payload elements and never mutated. Every
//! field keeps the text it arrived with; numeric coercion happens on demand
//! through [`Field::number`] so that a bad value surfaces as an error rather
//! than as zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::payload::Element;
use crate::InstrumentKind;

/// Why a field could not be used as a number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("value missing")]
    Missing,
    #[error("not a number: {0:?}")]
    NotNumeric(String),
}

/// A single attribute value as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Field(Option<String>);

impl Field {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }

    /// The raw text, if present.
    pub fn text(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The raw text, or an empty string.
    pub fn text_or_empty(&self) -> &str {
        self.text().unwrap_or("")
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// Parse the value as a finite number.
    ///
    /// Blank text counts as missing. `NaN` and infinities are rejected.
    pub fn number(&self) -> Result<f64, FieldError> {
        let text = match self.text().map(str::trim) {
            None | Some("") => return Err(FieldError::Missing),
            Some(t) => t,
        };

        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(FieldError::NotNumeric(text.to_string())),
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::new(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text_or_empty())
    }
}

fn field(element: &Element, name: &str) -> Field {
    Field(element.attrs.get(name).cloned())
}

/// A record decodable from a payload element.
pub trait Reading: Sized {
    const KIND: InstrumentKind;

    /// Build the record from an element's named attributes. Extra
    /// attributes are ignored; absent ones become missing fields.
    fn from_element(element: &Element) -> Self;
}

/// Anemometer reading, averaged over the sampling window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindReading {
    pub sample_time: Field,
    /// Scalar-averaged speed, m/s.
    pub speed_scalar: Field,
    /// Unit-vector-averaged direction the wind blows from, degrees.
    pub dir_unit_vector: Field,
    pub speed_std: Field,
    pub speed_vector: Field,
    pub dir_vector: Field,
    /// Peak gust in the window, m/s.
    pub gust_speed: Field,
    pub gust_dir: Field,
    pub gust_time: Field,
}

impl Reading for WindReading {
    const KIND: InstrumentKind = InstrumentKind::Wind;

    fn from_element(e: &Element) -> Self {
        Self {
            sample_time: field(e, "sample_time"),
            speed_scalar: field(e, "speed_scalar"),
            dir_unit_vector: field(e, "dir_unit_vector"),
            speed_std: field(e, "speed_std"),
            speed_vector: field(e, "speed_vector"),
            dir_vector: field(e, "dir_vector"),
            gust_speed: field(e, "gust_speed"),
            gust_dir: field(e, "gust_dir"),
            gust_time: field(e, "gust_time"),
        }
    }
}

/// GPS fix. Latitude is north-positive, longitude east-positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpsReading {
    pub sample_time: Field,
    pub lat: Field,
    pub lon: Field,
    /// Speed over ground, m/s.
    pub speed: Field,
    /// Course over ground, degrees.
    pub track: Field,
}

impl Reading for GpsReading {
    const KIND: InstrumentKind = InstrumentKind::Gps;

    fn from_element(e: &Element) -> Self {
        Self {
            sample_time: field(e, "sample_time"),
            lat: field(e, "lat"),
            lon: field(e, "lon"),
            speed: field(e, "speed"),
            track: field(e, "track"),
        }
    }
}

/// Flow-through cell reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowReading {
    pub cast_time: Field,
    /// Liters per minute.
    pub flow_rate: Field,
}

impl Reading for FlowReading {
    const KIND: InstrumentKind = InstrumentKind::Flow;

    fn from_element(e: &Element) -> Self {
        Self {
            cast_time: field(e, "cast_time"),
            flow_rate: field(e, "flow_rate"),
        }
    }
}

/// Water-quality sonde reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SondeReading {
    pub sample_time: Field,
    pub tempc: Field,
    pub salppt: Field,
    pub dissolved_o2: Field,
    pub turbid: Field,
    pub chl: Field,
    pub ph: Field,
}

impl Reading for SondeReading {
    const KIND: InstrumentKind = InstrumentKind::Sonde;

    fn from_element(e: &Element) -> Self {
        Self {
            sample_time: field(e, "sample_time"),
            tempc: field(e, "tempc"),
            salppt: field(e, "salppt"),
            dissolved_o2: field(e, "dissolved_o2"),
            turbid: field(e, "turbid"),
            chl: field(e, "chl"),
            ph: field(e, "ph"),
        }
    }
}

/// Depth sounder reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepthReading {
    pub sample_time: Field,
    pub working_depth: Field,
    /// Meters.
    pub calculated_depth: Field,
    pub calculated_depth_std: Field,
    pub num_good_pings: Field,
    pub temp_c: Field,
}

impl Reading for DepthReading {
    const KIND: InstrumentKind = InstrumentKind::Depth;

    fn from_element(e: &Element) -> Self {
        Self {
            sample_time: field(e, "sample_time"),
            working_depth: field(e, "working_depth"),
            calculated_depth: field(e, "calculated_depth"),
            calculated_depth_std: field(e, "calculated_depth_std"),
            num_good_pings: field(e, "num_good_pings"),
            temp_c: field(e, "temp_c"),
        }
    }
}
