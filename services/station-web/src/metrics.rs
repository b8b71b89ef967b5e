//! Request counters exported through the Prometheus recorder.

use metrics::counter;

use reading_protocol::InstrumentKind;

pub fn record_page_load(station: &str) {
    counter!("station_page_loads_total", "station" => station.to_string()).increment(1);
}

pub fn record_missing_elements(station: &str, missing: &[InstrumentKind]) {
    for kind in missing {
        counter!(
            "station_missing_elements_total",
            "station" => station.to_string(),
            "kind" => kind.tag()
        )
        .increment(1);
    }
}
