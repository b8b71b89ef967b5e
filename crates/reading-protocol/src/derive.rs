//! Derived, human-facing quantities.
//!
//! All functions are pure. Arithmetic runs at full precision and values are
//! rounded only when formatted. A field that does not parse propagates as a
//! [`FieldError`] and formats as [`UNAVAILABLE`].

use serde::Serialize;
use std::fmt;

use station_common::display_time;

use crate::records::{DepthReading, Field, FieldError, FlowReading, GpsReading, SondeReading, WindReading};

/// A derived value, or the reason its input was unusable.
pub type Derived<T> = Result<T, FieldError>;

/// Display text for a value that could not be derived.
pub const UNAVAILABLE: &str = "unavailable";

/// Meters per second to knots.
pub const MS_TO_KNOTS: f64 = 1.943844492440605;

/// Meters per second to miles per hour.
pub const MS_TO_MPH: f64 = 2.23694;

/// Meters per second to knots, as used for the GPS popup.
pub const GPS_MS_TO_KNOTS: f64 = 1.94384;

/// Meters to feet.
pub const METERS_TO_FEET: f64 = 3.280839895013123;

/// Flow rate (L/min) below which water-quality data is flagged.
pub const LOW_FLOW_THRESHOLD: f64 = 5.0;

/// 16-point compass rose starting at north.
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

// ============================================================================
// Scalar conversions
// ============================================================================

/// Index into [`COMPASS_POINTS`] for a direction in degrees.
///
/// Buckets are 22.5° wide and centred on each point, so N covers
/// [348.75, 11.25). Any finite input wraps into 0..16.
pub fn compass_index(degrees: f64) -> usize {
    ((degrees / 22.5).round() as i64).rem_euclid(16) as usize
}

pub fn compass_point(degrees: f64) -> &'static str {
    COMPASS_POINTS[compass_index(degrees)]
}

pub fn knots(ms: f64) -> f64 {
    ms * MS_TO_KNOTS
}

pub fn mph(ms: f64) -> f64 {
    ms * MS_TO_MPH
}

pub fn gps_knots(ms: f64) -> f64 {
    ms * GPS_MS_TO_KNOTS
}

pub fn fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn feet(meters: f64) -> f64 {
    meters * METERS_TO_FEET
}

// ============================================================================
// Coordinates
// ============================================================================

/// A coordinate as whole degrees plus decimal minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sexagesimal {
    pub degrees: i64,
    pub minutes: f64,
    pub hemisphere: char,
}

impl Sexagesimal {
    /// Reconstruct decimal degrees.
    pub fn to_decimal(&self) -> f64 {
        let magnitude = self.degrees as f64 + self.minutes / 60.0;
        match self.hemisphere {
            'S' | 'W' => -magnitude,
            _ => magnitude,
        }
    }
}

impl fmt::Display for Sexagesimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut degrees = self.degrees;
        let mut minutes = (self.minutes * 1000.0).round() / 1000.0;
        if minutes >= 60.0 {
            degrees += 1;
            minutes -= 60.0;
        }
        write!(f, "{} {:.3} {}", degrees, minutes, self.hemisphere)
    }
}

/// Latitude with a fixed `N` suffix.
///
/// All deployed stations are in the northern hemisphere; a negative latitude
/// still decomposes consistently (floor toward negative infinity) but keeps
/// the `N` suffix.
pub fn latitude_dms(lat: f64) -> Sexagesimal {
    let degrees = lat.floor();
    Sexagesimal {
        degrees: degrees as i64,
        minutes: (lat - degrees) * 60.0,
        hemisphere: 'N',
    }
}

/// Longitude with a fixed `W` suffix. The sign is discarded.
pub fn longitude_dms(lon: f64) -> Sexagesimal {
    let magnitude = lon.abs();
    let degrees = magnitude.floor();
    Sexagesimal {
        degrees: degrees as i64,
        minutes: (magnitude - degrees) * 60.0,
        hemisphere: 'W',
    }
}

// ============================================================================
// Flow quality
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowQuality {
    Nominal,
    /// Too little water past the sensors; water-quality data may be unreliable.
    Low,
}

pub fn flow_quality(rate_lpm: f64) -> FlowQuality {
    if rate_lpm < LOW_FLOW_THRESHOLD {
        FlowQuality::Low
    } else {
        FlowQuality::Nominal
    }
}

// ============================================================================
// Per-record summaries
// ============================================================================

fn observed(field: &Field) -> String {
    display_time(field.text_or_empty()).to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindSummary {
    pub observed: String,
    pub direction: Derived<f64>,
    pub compass: Derived<&'static str>,
    pub speed_kts: Derived<f64>,
    pub speed_mph: Derived<f64>,
    pub gust_kts: Derived<f64>,
    pub gust_mph: Derived<f64>,
}

pub fn derive_wind(wind: &WindReading) -> WindSummary {
    let direction = wind.dir_unit_vector.number();
    let speed = wind.speed_scalar.number();
    let gust = wind.gust_speed.number();

    WindSummary {
        observed: observed(&wind.sample_time),
        compass: direction.clone().map(compass_point),
        direction,
        speed_kts: speed.clone().map(knots),
        speed_mph: speed.map(mph),
        gust_kts: gust.clone().map(knots),
        gust_mph: gust.map(mph),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpsSummary {
    pub observed: String,
    pub latitude: Derived<Sexagesimal>,
    pub longitude: Derived<Sexagesimal>,
    pub speed_kts: Derived<f64>,
    pub course: Derived<f64>,
}

pub fn derive_gps(gps: &GpsReading) -> GpsSummary {
    GpsSummary {
        observed: observed(&gps.sample_time),
        latitude: gps.lat.number().map(latitude_dms),
        longitude: gps.lon.number().map(longitude_dms),
        speed_kts: gps.speed.number().map(gps_knots),
        course: gps.track.number(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowSummary {
    pub observed: String,
    pub rate: Derived<f64>,
    pub quality: Derived<FlowQuality>,
}

pub fn derive_flow(flow: &FlowReading) -> FlowSummary {
    let rate = flow.flow_rate.number();
    FlowSummary {
        observed: observed(&flow.cast_time),
        quality: rate.clone().map(flow_quality),
        rate,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SondeSummary {
    pub observed: String,
    pub temp_c: Derived<f64>,
    /// Celsius exactly as the sonde reported it.
    pub temp_c_text: String,
    pub temp_f: Derived<f64>,
    pub salinity: Derived<f64>,
    pub dissolved_o2: Derived<f64>,
    pub turbidity: Derived<f64>,
    pub chlorophyll: Derived<f64>,
    pub ph: Derived<f64>,
}

pub fn derive_sonde(sonde: &SondeReading) -> SondeSummary {
    let temp_c = sonde.tempc.number();
    SondeSummary {
        observed: observed(&sonde.sample_time),
        temp_f: temp_c.clone().map(fahrenheit),
        temp_c,
        temp_c_text: sonde.tempc.text_or_empty().to_string(),
        salinity: sonde.salppt.number(),
        dissolved_o2: sonde.dissolved_o2.number(),
        turbidity: sonde.turbid.number(),
        chlorophyll: sonde.chl.number(),
        ph: sonde.ph.number(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepthSummary {
    pub observed: String,
    pub depth_ft: Derived<f64>,
    pub surface_temp_f: Derived<f64>,
}

pub fn derive_depth(depth: &DepthReading) -> DepthSummary {
    DepthSummary {
        observed: observed(&depth.sample_time),
        depth_ft: depth.calculated_depth.number().map(feet),
        surface_temp_f: depth.temp_c.number().map(fahrenheit),
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Format with a fixed number of decimals. Ties round away from zero.
pub fn fixed(value: &Derived<f64>, decimals: usize) -> String {
    match value {
        Ok(v) => {
            let scale = 10f64.powi(decimals as i32);
            format!("{:.*}", decimals, (v * scale).round() / scale)
        }
        Err(_) => UNAVAILABLE.to_string(),
    }
}

/// Format with `Display`, unrounded.
pub fn show<T: fmt::Display>(value: &Derived<T>) -> String {
    match value {
        Ok(v) => v.to_string(),
        Err(_) => UNAVAILABLE.to_string(),
    }
}
