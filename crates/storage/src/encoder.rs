//! Payload encoder: the latest rows of a station, in wire order.

use metrics::counter;
use tracing::{debug, warn};

use reading_protocol::{InstrumentKind, Payload};
use station_common::StationConfig;

use crate::source::ReadingSource;

/// Build the payload for `station`.
///
/// Kinds are emitted in the fixed order wind, gps, flow, sonde, depth,
/// restricted to the station's variant. GPS is bounded by the station's
/// row limit; every other kind carries at most its latest row. A kind whose
/// query fails is logged and left out, which the decoder reports as a
/// missing element.
pub async fn encode_station(source: &dyn ReadingSource, station: &StationConfig) -> Payload {
    let mut payload = Payload::new(station.id.clone());

    for kind in InstrumentKind::ALL {
        if !station.variant.has(kind) {
            continue;
        }

        let limit = station.row_limit(kind);
        match source.latest_rows(&station.table_prefix, kind, limit).await {
            Ok(rows) => {
                debug!(station = %station.id, kind = %kind, rows = rows.len(), "Encoded rows");
                rows.into_iter()
                    .filter(|row| row.tag == kind.tag())
                    .take(limit)
                    .for_each(|row| payload.push(row));
            }
            Err(e) => {
                warn!(
                    station = %station.id,
                    kind = %kind,
                    source = source.name(),
                    error = %e,
                    "Reading source query failed"
                );
                counter!(
                    "station_source_errors_total",
                    "station" => station.id.clone(),
                    "kind" => kind.tag()
                )
                .increment(1);
            }
        }
    }

    payload
}
