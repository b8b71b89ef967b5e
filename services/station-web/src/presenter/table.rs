//! Two-column label/value table.

use maud::{html, Markup, PreEscaped, Render};
use serde::Serialize;

use reading_protocol::derive::{
    self, fixed, show, DepthSummary, FlowQuality, FlowSummary, GpsSummary, SondeSummary,
    WindSummary,
};
use reading_protocol::StationSnapshot;
use station_common::StationVariant;

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableRow {
    Value { label: String, value: String },
    /// Blank row between instrument blocks.
    Separator,
    /// Emphasized row flagging unreliable data.
    Warning { label: String, value: String },
}

/// Ordered table rows, built by appending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataTable {
    rows: Vec<TableRow>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_value(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push(TableRow::Value {
            label: label.into(),
            value: value.into(),
        });
    }

    pub fn push_warning(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push(TableRow::Warning {
            label: label.into(),
            value: value.into(),
        });
    }

    pub fn push_separator(&mut self) {
        self.rows.push(TableRow::Separator);
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of the first row labelled `label`.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows.iter().find_map(|row| match row {
            TableRow::Value { label: l, value } | TableRow::Warning { label: l, value }
                if l == label =>
            {
                Some(value.as_str())
            }
            _ => None,
        })
    }

    pub fn has_warning(&self) -> bool {
        self.rows
            .iter()
            .any(|row| matches!(row, TableRow::Warning { .. }))
    }

    /// Append `block`, preceded by a separator unless the table is empty.
    fn append_block(&mut self, block: DataTable) {
        if block.is_empty() {
            return;
        }
        if !self.is_empty() {
            self.push_separator();
        }
        self.rows.extend(block.rows);
    }

    /// Render as plain text, one `Label: value` line per row.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for row in &self.rows {
            match row {
                TableRow::Value { label, value } => {
                    text.push_str(&format!("{}: {}\n", label, value))
                }
                TableRow::Separator => text.push('\n'),
                TableRow::Warning { label, value } => {
                    text.push_str(&format!("!! {}: {}\n", label, value))
                }
            }
        }
        text
    }
}

impl Render for DataTable {
    fn render(&self) -> Markup {
        html! {
            table id="data_table" {
                @for row in &self.rows {
                    @match row {
                        TableRow::Value { label, value } => {
                            tr { td { (label) } td { (value) } }
                        }
                        TableRow::Separator => {
                            tr class="separator" { td { (PreEscaped("&nbsp;")) } td {} }
                        }
                        TableRow::Warning { label, value } => {
                            tr class="warning" {
                                td { strong { (label) } }
                                td { strong { (value) } }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Build the reading table from the latest record of each kind.
///
/// Blocks appear in the order wind, GPS, flow, then sonde or depth. A kind
/// with no readings contributes no block.
pub fn build_table(snapshot: &StationSnapshot, variant: StationVariant) -> DataTable {
    let mut table = DataTable::new();

    if let Some(wind) = snapshot.latest_wind() {
        table.append_block(wind_block(&derive::derive_wind(wind), variant.shows_mph()));
    }
    if let Some(gps) = snapshot.latest_gps() {
        table.append_block(gps_block(&derive::derive_gps(gps)));
    }
    if let Some(flow) = snapshot.latest_flow() {
        table.append_block(flow_block(&derive::derive_flow(flow)));
    }
    if let Some(sonde) = snapshot.latest_sonde() {
        table.append_block(sonde_block(&derive::derive_sonde(sonde)));
    }
    if let Some(depth) = snapshot.latest_depth() {
        table.append_block(depth_block(&derive::derive_depth(depth)));
    }

    table
}

fn speed_text(kts: &derive::Derived<f64>, mph: &derive::Derived<f64>, with_mph: bool) -> String {
    match (kts, with_mph) {
        (Ok(_), true) => format!("{} kts ({} mph)", fixed(kts, 1), fixed(mph, 1)),
        (Ok(_), false) => format!("{} kts", fixed(kts, 1)),
        (Err(_), _) => fixed(kts, 1),
    }
}

fn wind_block(wind: &WindSummary, with_mph: bool) -> DataTable {
    let mut block = DataTable::new();
    block.push_value("Wind Observation Time", wind.observed.as_str());

    let direction = match &wind.direction {
        Ok(_) => format!("{} ({})", fixed(&wind.direction, 0), show(&wind.compass)),
        Err(_) => fixed(&wind.direction, 0),
    };
    block.push_value("Wind Direction (from)", direction);
    block.push_value(
        "Wind Speed",
        speed_text(&wind.speed_kts, &wind.speed_mph, with_mph),
    );
    block.push_value(
        "Wind Gust",
        speed_text(&wind.gust_kts, &wind.gust_mph, with_mph),
    );
    block
}

fn gps_block(gps: &GpsSummary) -> DataTable {
    let mut block = DataTable::new();
    block.push_value("GPS Observation Time", gps.observed.as_str());
    block.push_value("Lat", show(&gps.latitude));
    block.push_value("Lon", show(&gps.longitude));
    block
}

fn flow_block(flow: &FlowSummary) -> DataTable {
    let mut block = DataTable::new();
    block.push_value("Flow Rate Observation Time", flow.observed.as_str());
    block.push_value(
        "Flow Rate",
        with_note(
            fixed(&flow.rate, 1),
            "l/min (Shows if water is flowing past our sensor)",
            flow.rate.is_ok(),
        ),
    );
    if flow.quality == Ok(FlowQuality::Low) {
        block.push_warning("Flow rate too slow", "Water Quality Data may be unreliable");
    }
    block
}

fn sonde_block(sonde: &SondeSummary) -> DataTable {
    let mut block = DataTable::new();
    block.push_value("Water Observation Time", sonde.observed.as_str());

    let temperature = match &sonde.temp_f {
        Ok(_) => format!(
            "{} deg F ({} deg C)",
            fixed(&sonde.temp_f, 1),
            sonde.temp_c_text
        ),
        Err(_) => fixed(&sonde.temp_f, 1),
    };
    block.push_value("Water Temperature", temperature);

    let rows = [
        ("Salinity", &sonde.salinity, "(fresh water = 0, ocean water = 35)"),
        (
            "Dissolved Oxygen",
            &sonde.dissolved_o2,
            "milligrams/l (Range: 0 to about 15)",
        ),
        ("Turbidity", &sonde.turbidity, "NTU (Low values for clearer water)"),
        (
            "Chlorophyll",
            &sonde.chlorophyll,
            "micrograms/l (>40 considered impaired)",
        ),
        ("pH", &sonde.ph, "(normally 7-9)"),
    ];
    for (label, value, note) in rows {
        block.push_value(label, with_note(show(value), note, value.is_ok()));
    }
    block
}

fn depth_block(depth: &DepthSummary) -> DataTable {
    let mut block = DataTable::new();
    block.push_value("Depth Observation Time", depth.observed.as_str());
    block.push_value(
        "Water Depth",
        with_note(fixed(&depth.depth_ft, 1), "ft", depth.depth_ft.is_ok()),
    );
    block.push_value(
        "Surface Temp",
        with_note(
            fixed(&depth.surface_temp_f, 0),
            "Deg. F",
            depth.surface_temp_f.is_ok(),
        ),
    );
    block
}

/// Units and explanatory text only follow available values.
fn with_note(value: String, note: &str, available: bool) -> String {
    if available {
        format!("{} {}", value, note)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reading_protocol::{decode, Element, InstrumentKind, Payload};

    fn ferry_kinds() -> &'static [InstrumentKind] {
        StationVariant::WaterQuality.kinds()
    }

    fn scenario() -> Payload {
        Payload::new("ferry")
            .with_element(
                Element::new(InstrumentKind::Wind)
                    .with_attr("sample_time", "2021-03-05 12:00:00.25-05")
                    .with_attr("speed_scalar", "5.0")
                    .with_attr("dir_unit_vector", "354")
                    .with_attr("gust_speed", "7.5"),
            )
            .with_element(
                Element::new(InstrumentKind::Gps)
                    .with_attr("sample_time", "2021-03-05 12:00:00")
                    .with_attr("lat", "34.5")
                    .with_attr("lon", "-77.5"),
            )
            .with_element(
                Element::new(InstrumentKind::Flow)
                    .with_attr("cast_time", "2021-03-05 11:58:00")
                    .with_attr("flow_rate", "3.2"),
            )
            .with_element(
                Element::new(InstrumentKind::Sonde)
                    .with_attr("sample_time", "2021-03-05 11:58:00")
                    .with_attr("tempc", "20"),
            )
    }

    #[test]
    fn test_scenario_rows() {
        let decoded = decode(&scenario(), ferry_kinds());
        let table = build_table(&decoded.snapshot, StationVariant::WaterQuality);

        assert_eq!(table.value_of("Wind Observation Time"), Some("2021-03-05 12:00:00"));
        assert_eq!(table.value_of("Wind Direction (from)"), Some("354 (N)"));
        assert_eq!(table.value_of("Wind Speed"), Some("9.7 kts (11.2 mph)"));
        assert_eq!(table.value_of("Lat"), Some("34 30.000 N"));
        assert_eq!(table.value_of("Lon"), Some("77 30.000 W"));
        assert_eq!(
            table.value_of("Water Temperature"),
            Some("68.0 deg F (20 deg C)")
        );
        assert!(table.has_warning());
        assert_eq!(table.value_of("Salinity"), Some(UNAVAILABLE_TEXT));
    }

    const UNAVAILABLE_TEXT: &str = reading_protocol::derive::UNAVAILABLE;

    #[test]
    fn test_separators_between_blocks_only() {
        let decoded = decode(&scenario(), ferry_kinds());
        let table = build_table(&decoded.snapshot, StationVariant::WaterQuality);
        let separators: Vec<usize> = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| matches!(row, TableRow::Separator))
            .map(|(i, _)| i)
            .collect();

        assert_eq!(separators.len(), 3);
        assert!(!matches!(table.rows().first(), Some(TableRow::Separator)));
        assert!(!matches!(table.rows().last(), Some(TableRow::Separator)));
    }

    #[test]
    fn test_missing_kind_skips_block() {
        let mut payload = scenario();
        payload.elements.retain(|e| e.tag != "flow");
        let decoded = decode(&payload, ferry_kinds());
        let table = build_table(&decoded.snapshot, StationVariant::WaterQuality);

        assert!(table.value_of("Flow Rate").is_none());
        assert!(!table.has_warning());
        assert!(table.value_of("Water Temperature").is_some());
    }

    #[test]
    fn test_nominal_flow_has_no_warning() {
        let mut payload = scenario();
        for element in payload.elements.iter_mut() {
            if element.tag == "flow" {
                element.set_attr("flow_rate", "5.0");
            }
        }
        let decoded = decode(&payload, ferry_kinds());
        let table = build_table(&decoded.snapshot, StationVariant::WaterQuality);
        assert!(!table.has_warning());
        assert_eq!(
            table.value_of("Flow Rate"),
            Some("5.0 l/min (Shows if water is flowing past our sensor)")
        );
    }

    #[test]
    fn test_flow_rate_one_decimal() {
        let mut payload = scenario();
        for element in payload.elements.iter_mut() {
            if element.tag == "flow" {
                element.set_attr("flow_rate", "3.25");
            }
        }
        let decoded = decode(&payload, ferry_kinds());
        let table = build_table(&decoded.snapshot, StationVariant::WaterQuality);
        assert_eq!(
            table.value_of("Flow Rate"),
            Some("3.3 l/min (Shows if water is flowing past our sensor)")
        );
    }

    #[test]
    fn test_celsius_shown_as_reported() {
        let mut payload = scenario();
        for element in payload.elements.iter_mut() {
            if element.tag == "sonde" {
                element.set_attr("tempc", "20.0");
            }
        }
        let decoded = decode(&payload, ferry_kinds());
        let table = build_table(&decoded.snapshot, StationVariant::WaterQuality);
        assert_eq!(
            table.value_of("Water Temperature"),
            Some("68.0 deg F (20.0 deg C)")
        );
    }

    #[test]
    fn test_direction_tie_rounds_up() {
        let mut payload = scenario();
        for element in payload.elements.iter_mut() {
            if element.tag == "wind" {
                element.set_attr("dir_unit_vector", "354.5");
            }
        }
        let decoded = decode(&payload, ferry_kinds());
        let table = build_table(&decoded.snapshot, StationVariant::WaterQuality);
        assert_eq!(table.value_of("Wind Direction (from)"), Some("355 (N)"));
    }

    #[test]
    fn test_profiler_speeds_without_mph() {
        let decoded = decode(&scenario(), &[InstrumentKind::Wind]);
        let table = build_table(&decoded.snapshot, StationVariant::Profiler);
        assert_eq!(table.value_of("Wind Speed"), Some("9.7 kts"));
    }

    #[test]
    fn test_unparsable_direction_is_unavailable() {
        let payload = Payload::new("ferry").with_element(
            Element::new(InstrumentKind::Wind)
                .with_attr("speed_scalar", "5.0")
                .with_attr("dir_unit_vector", "n/a"),
        );
        let decoded = decode(&payload, &[InstrumentKind::Wind]);
        let table = build_table(&decoded.snapshot, StationVariant::WaterQuality);
        assert_eq!(table.value_of("Wind Direction (from)"), Some("unavailable"));
        assert_eq!(table.value_of("Wind Gust"), Some("unavailable"));
    }

    #[test]
    fn test_html_escapes_and_marks_warnings() {
        let mut table = DataTable::new();
        table.push_value("Chlorophyll", "12.5 micrograms/l (>40 considered impaired)");
        table.push_value("<script>", "a & b");
        table.push_separator();
        table.push_warning("Flow rate too slow", "Water Quality Data may be unreliable");

        let html = table.render().into_string();
        assert!(html.contains("<td>Chlorophyll</td><td>12.5 micrograms/l (&gt;40 considered impaired)</td>"));
        assert!(html.contains("<td>&lt;script&gt;</td><td>a &amp; b</td>"));
        assert!(html.contains("<tr class=\"warning\"><td><strong>Flow rate too slow</strong></td>"));
        assert!(html.contains("class=\"separator\""));
    }

    #[test]
    fn test_text_rendering() {
        let mut table = DataTable::new();
        table.push_value("Wind Speed", "9.7 kts");
        table.push_separator();
        table.push_value("Lat", "34 30.000 N");
        assert_eq!(table.to_text(), "Wind Speed: 9.7 kts\n\nLat: 34 30.000 N\n");
    }
}
