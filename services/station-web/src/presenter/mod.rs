//! Presentation of decoded readings: the label/value table, the GPS map
//! plot and the HTML page that carries both.

pub mod map;
pub mod page;
pub mod table;

pub use map::{plot_track, MapPlot, Marker, MarkerSink, MarkerStyle};
pub use page::{render_page, Calendar};
pub use table::{build_table, DataTable, TableRow};

use serde::Serialize;

use reading_protocol::{Decoded, InstrumentKind};
use station_common::{StationConfig, StationVariant};

/// Everything shown for one station on one page load.
#[derive(Debug, Clone, Serialize)]
pub struct StationView {
    pub station: String,
    pub title: String,
    pub variant: StationVariant,
    /// Kinds the station should report but did not.
    pub missing: Vec<InstrumentKind>,
    pub alerts: Vec<String>,
    pub table: DataTable,
    pub map: MapPlot,
}

/// Build the view for `station` from its decoded readings.
pub fn present(station: &StationConfig, decoded: &Decoded) -> StationView {
    let mut map = MapPlot::new(&station.map);
    plot_track(&decoded.snapshot.gps, &mut map);

    StationView {
        station: station.id.clone(),
        title: station.display_title().to_string(),
        variant: station.variant,
        missing: decoded.report.missing.clone(),
        alerts: decoded.report.alerts(),
        table: build_table(&decoded.snapshot, station.variant),
        map,
    }
}
