//! GPS track plotting.
//!
//! The browser-side map library is reached through [`MarkerSink`]: the only
//! operation it needs is "place a marker at a coordinate, optionally with a
//! popup". [`MapPlot`] is the sink used by the service; it serializes to the
//! JSON the page hands to the map library.

use serde::Serialize;

use reading_protocol::derive::{fixed, gps_knots};
use reading_protocol::GpsReading;
use station_common::MapView;

/// Marker emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    /// Small grey marker for an earlier fix.
    History,
    /// Default marker with popup for the most recent fix.
    Current,
}

impl MarkerStyle {
    pub fn color(&self) -> Option<&'static str> {
        match self {
            MarkerStyle::History => Some("#808080"),
            MarkerStyle::Current => None,
        }
    }

    pub fn scale(&self) -> f64 {
        match self {
            MarkerStyle::History => 0.2,
            MarkerStyle::Current => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub style: MarkerStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    pub scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
}

impl Marker {
    pub fn new(lat: f64, lon: f64, style: MarkerStyle) -> Self {
        Self {
            lat,
            lon,
            style,
            color: style.color(),
            scale: style.scale(),
            popup: None,
        }
    }

    pub fn with_popup(mut self, popup: impl Into<String>) -> Self {
        self.popup = Some(popup.into());
        self
    }
}

/// Minimal map-library contract.
pub trait MarkerSink {
    fn place_marker(&mut self, marker: Marker);
}

/// Map viewport plus the markers placed on it.
///
/// The viewport comes from station configuration and is never fit to the
/// markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPlot {
    pub center: [f64; 2],
    pub zoom: f64,
    pub markers: Vec<Marker>,
}

impl MapPlot {
    pub fn new(view: &MapView) -> Self {
        Self {
            center: [view.lat, view.lon],
            zoom: view.zoom,
            markers: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&Marker> {
        self.markers
            .iter()
            .find(|m| m.style == MarkerStyle::Current)
    }

    pub fn history_len(&self) -> usize {
        self.markers
            .iter()
            .filter(|m| m.style == MarkerStyle::History)
            .count()
    }
}

impl MarkerSink for MapPlot {
    fn place_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }
}

/// Popup text for the current fix.
pub fn current_popup(fix: &GpsReading) -> String {
    format!(
        "Speed: {} kts<br>Course: {}",
        fixed(&fix.speed.number().map(gps_knots), 1),
        fixed(&fix.track.number(), 0)
    )
}

/// Plot a newest-first GPS sequence onto `sink`.
///
/// Every fix gets a history marker, oldest first; the newest fix then gets
/// the current marker and popup. Fixes without usable coordinates are
/// skipped. Returns the number of markers placed.
pub fn plot_track(fixes: &[GpsReading], sink: &mut dyn MarkerSink) -> usize {
    let mut placed = 0;

    for fix in fixes.iter().rev() {
        if let Some((lat, lon)) = coordinates(fix) {
            sink.place_marker(Marker::new(lat, lon, MarkerStyle::History));
            placed += 1;
        }
    }

    if let Some(latest) = fixes.first() {
        if let Some((lat, lon)) = coordinates(latest) {
            sink.place_marker(
                Marker::new(lat, lon, MarkerStyle::Current).with_popup(current_popup(latest)),
            );
            placed += 1;
        }
    }

    placed
}

fn coordinates(fix: &GpsReading) -> Option<(f64, f64)> {
    match (fix.lat.number(), fix.lon.number()) {
        (Ok(lat), Ok(lon)) => Some((lat, lon)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reading_protocol::{Element, InstrumentKind, Reading};

    fn fix(lat: &str, lon: &str, speed: &str, track: &str) -> GpsReading {
        GpsReading::from_element(
            &Element::new(InstrumentKind::Gps)
                .with_attr("lat", lat)
                .with_attr("lon", lon)
                .with_attr("speed", speed)
                .with_attr("track", track),
        )
    }

    fn view() -> MapView {
        MapView {
            lat: 33.947,
            lon: -77.9675,
            zoom: 12.0,
        }
    }

    #[test]
    fn test_history_oldest_first_then_current() {
        let fixes = vec![
            fix("34.0", "-77.0", "5.2", "181.4"),
            fix("33.9", "-77.1", "4.0", "90"),
            fix("33.8", "-77.2", "4.0", "90"),
        ];
        let mut plot = MapPlot::new(&view());
        assert_eq!(plot_track(&fixes, &mut plot), 4);

        let lats: Vec<f64> = plot.markers.iter().map(|m| m.lat).collect();
        assert_eq!(lats, vec![33.8, 33.9, 34.0, 34.0]);
        assert_eq!(plot.history_len(), 3);

        let current = plot.current().unwrap();
        assert_eq!(current.lon, -77.0);
        assert_eq!(
            current.popup.as_deref(),
            Some("Speed: 10.1 kts<br>Course: 181")
        );
    }

    #[test]
    fn test_viewport_not_fit_to_track() {
        let fixes = vec![fix("40.0", "-70.0", "0", "0")];
        let mut plot = MapPlot::new(&view());
        plot_track(&fixes, &mut plot);
        assert_eq!(plot.center, [33.947, -77.9675]);
        assert_eq!(plot.zoom, 12.0);
    }

    #[test]
    fn test_unusable_fixes_skipped() {
        let fixes = vec![fix("", "-77.0", "1", "1"), fix("33.9", "-77.1", "1", "1")];
        let mut plot = MapPlot::new(&view());
        assert_eq!(plot_track(&fixes, &mut plot), 1);
        assert!(plot.current().is_none());
    }

    #[test]
    fn test_empty_track() {
        let mut plot = MapPlot::new(&view());
        assert_eq!(plot_track(&[], &mut plot), 0);
        assert!(plot.markers.is_empty());
    }

    #[test]
    fn test_popup_unavailable_speed() {
        let popup = current_popup(&fix("34.0", "-77.0", "??", "12.6"));
        assert_eq!(popup, "Speed: unavailable kts<br>Course: 13");
    }

    #[test]
    fn test_popup_course_tie_rounds_up() {
        let popup = current_popup(&fix("34.0", "-77.0", "1.0", "180.5"));
        assert_eq!(popup, "Speed: 1.9 kts<br>Course: 181");
    }

    #[test]
    fn test_history_marker_style() {
        let marker = Marker::new(1.0, 2.0, MarkerStyle::History);
        assert_eq!(marker.color, Some("#808080"));
        assert_eq!(marker.scale, 0.2);
    }
}
