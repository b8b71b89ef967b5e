//! Common test fixtures for station monitor tests.
//!
//! This module provides pre-defined elements, payloads and station
//! configurations that represent the deployed station variants.

use chrono::NaiveDate;
use reading_protocol::{Element, InstrumentKind, Payload};
use station_common::{ArchiveSettings, MapView, StationConfig, StationVariant, DEFAULT_GPS_LIMIT};

/// Deployed station coordinates and identifiers.
pub mod stations {
    /// Southport to Fort Fisher ferry.
    pub const FERRY_ID: &str = "cherrybranch";
    pub const FERRY_CENTER: (f64, f64) = (33.947, -77.9675);

    /// Haw River vertical profiler on Jordan Lake.
    pub const PROFILER_ID: &str = "jlhaw";
    pub const PROFILER_CENTER: (f64, f64) = (35.7, -79.03);
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// Ferry-mounted water-quality station.
pub fn ferry_station() -> StationConfig {
    StationConfig {
        id: stations::FERRY_ID.to_string(),
        title: "Southport to Fort Fisher".to_string(),
        table_prefix: stations::FERRY_ID.to_string(),
        variant: StationVariant::WaterQuality,
        gps_limit: DEFAULT_GPS_LIMIT,
        map: MapView {
            lat: stations::FERRY_CENTER.0,
            lon: stations::FERRY_CENTER.1,
            zoom: 12.0,
        },
        archive: ArchiveSettings {
            image_folder: "cherrybranch/".to_string(),
            file_prefix: "_".to_string(),
            first_data: ymd(2019, 6, 1),
            last_data: None,
            gallery_dir: None,
        },
    }
}

/// Vertical profiler station with a closed deployment window.
pub fn profiler_station() -> StationConfig {
    StationConfig {
        id: stations::PROFILER_ID.to_string(),
        title: "Haw River Profiler".to_string(),
        table_prefix: stations::PROFILER_ID.to_string(),
        variant: StationVariant::Profiler,
        gps_limit: 1,
        map: MapView {
            lat: stations::PROFILER_CENTER.0,
            lon: stations::PROFILER_CENTER.1,
            zoom: 13.0,
        },
        archive: ArchiveSettings {
            image_folder: "jlhaw/".to_string(),
            file_prefix: "AVP3_".to_string(),
            first_data: ymd(2016, 5, 1),
            last_data: Some(ymd(2017, 7, 26)),
            gallery_dir: Some("cams/jlhaw".to_string()),
        },
    }
}

pub fn wind_element(time: &str, speed_ms: &str, dir_deg: &str) -> Element {
    Element::new(InstrumentKind::Wind)
        .with_attr("sample_time", time)
        .with_attr("speed_scalar", speed_ms)
        .with_attr("dir_unit_vector", dir_deg)
        .with_attr("speed_std", "0.4")
        .with_attr("speed_vector", speed_ms)
        .with_attr("dir_vector", dir_deg)
        .with_attr("gust_speed", speed_ms)
        .with_attr("gust_dir", dir_deg)
        .with_attr("gust_time", time)
}

pub fn gps_element(time: &str, lat: &str, lon: &str, speed_ms: &str, track: &str) -> Element {
    Element::new(InstrumentKind::Gps)
        .with_attr("sample_time", time)
        .with_attr("lat", lat)
        .with_attr("lon", lon)
        .with_attr("speed", speed_ms)
        .with_attr("track", track)
}

pub fn flow_element(time: &str, rate_lpm: &str) -> Element {
    Element::new(InstrumentKind::Flow)
        .with_attr("cast_time", time)
        .with_attr("flow_rate", rate_lpm)
}

pub fn sonde_element(time: &str, temp_c: &str) -> Element {
    Element::new(InstrumentKind::Sonde)
        .with_attr("sample_time", time)
        .with_attr("tempc", temp_c)
        .with_attr("salppt", "31.2")
        .with_attr("dissolved_o2", "7.8")
        .with_attr("turbid", "4.1")
        .with_attr("chl", "12.5")
        .with_attr("ph", "7.9")
}

pub fn depth_element(time: &str, depth_m: &str, temp_c: &str) -> Element {
    Element::new(InstrumentKind::Depth)
        .with_attr("sample_time", time)
        .with_attr("working_depth", depth_m)
        .with_attr("calculated_depth", depth_m)
        .with_attr("calculated_depth_std", "0.02")
        .with_attr("num_good_pings", "18")
        .with_attr("temp_c", temp_c)
}

/// Timestamp `n` minutes before the fixture's reference time.
pub fn minutes_ago(n: u32) -> String {
    let total = 12 * 60 - n as i64;
    format!(
        "2021-03-05 {:02}:{:02}:00.25-05",
        total.div_euclid(60),
        total.rem_euclid(60)
    )
}

/// One row per kind for the ferry: 5 m/s from 354°, fix at 34.5N 77.5W,
/// 3.2 L/min flow and 20 °C water.
pub fn ferry_scenario_payload() -> Payload {
    Payload::new(stations::FERRY_ID)
        .with_element(wind_element(&minutes_ago(0), "5.0", "354"))
        .with_element(gps_element(&minutes_ago(0), "34.5", "-77.5", "5.2", "181.4"))
        .with_element(flow_element(&minutes_ago(2), "3.2"))
        .with_element(sonde_element(&minutes_ago(2), "20"))
}

/// Ferry payload with a GPS track of `fixes` points, newest first.
pub fn ferry_track_payload(fixes: usize) -> Payload {
    let mut payload = Payload::new(stations::FERRY_ID)
        .with_element(wind_element(&minutes_ago(0), "3.0", "200"));
    for i in 0..fixes {
        let lat = 33.95 - i as f64 * 0.001;
        let lon = -77.96 + i as f64 * 0.001;
        payload.push(gps_element(
            &minutes_ago(i as u32),
            &format!("{:.4}", lat),
            &format!("{:.4}", lon),
            "4.0",
            "90",
        ));
    }
    payload
        .with_element(flow_element(&minutes_ago(0), "8.0"))
        .with_element(sonde_element(&minutes_ago(0), "18.5"))
}

/// Profiler payload: wind, one fix and one sounding.
pub fn profiler_payload() -> Payload {
    Payload::new(stations::PROFILER_ID)
        .with_element(wind_element(&minutes_ago(0), "2.5", "90"))
        .with_element(gps_element(&minutes_ago(0), "35.7012", "-79.0301", "0.0", "0"))
        .with_element(depth_element(&minutes_ago(1), "6.1", "24.6"))
}
