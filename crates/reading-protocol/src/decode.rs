//! Payload decoding.
//!
//! Decoding never fails as a whole: a kind with no elements yields an empty
//! sequence and is recorded in the [`DecodeReport`] so the page can raise a
//! visible alert while the other kinds still render.

use serde::Serialize;
use tracing::{debug, warn};

use crate::payload::Payload;
use crate::records::{DepthReading, FlowReading, GpsReading, Reading, SondeReading, WindReading};
use crate::InstrumentKind;

/// Immutable set of decoded readings for one page load.
///
/// Every sequence is newest-first; index 0 is the current reading. Kinds
/// not populated at the station are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StationSnapshot {
    pub station: String,
    pub wind: Vec<WindReading>,
    pub gps: Vec<GpsReading>,
    pub flow: Vec<FlowReading>,
    pub sonde: Vec<SondeReading>,
    pub depth: Vec<DepthReading>,
}

impl StationSnapshot {
    pub fn latest_wind(&self) -> Option<&WindReading> {
        self.wind.first()
    }

    pub fn latest_gps(&self) -> Option<&GpsReading> {
        self.gps.first()
    }

    pub fn latest_flow(&self) -> Option<&FlowReading> {
        self.flow.first()
    }

    pub fn latest_sonde(&self) -> Option<&SondeReading> {
        self.sonde.first()
    }

    pub fn latest_depth(&self) -> Option<&DepthReading> {
        self.depth.first()
    }

    /// Number of readings held for `kind`.
    pub fn len_of(&self, kind: InstrumentKind) -> usize {
        match kind {
            InstrumentKind::Wind => self.wind.len(),
            InstrumentKind::Gps => self.gps.len(),
            InstrumentKind::Flow => self.flow.len(),
            InstrumentKind::Sonde => self.sonde.len(),
            InstrumentKind::Depth => self.depth.len(),
        }
    }
}

/// Kinds that were expected but absent from the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub missing: Vec<InstrumentKind>,
}

impl DecodeReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn is_missing(&self, kind: InstrumentKind) -> bool {
        self.missing.contains(&kind)
    }

    /// User-facing alert text, one per missing kind.
    pub fn alerts(&self) -> Vec<String> {
        self.missing
            .iter()
            .map(|kind| format!("Failed to locate {} element", kind))
            .collect()
    }
}

/// Decoder output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Decoded {
    pub snapshot: StationSnapshot,
    pub report: DecodeReport,
}

/// Decode `payload` into typed readings.
///
/// Only kinds in `expected` are decoded; elements of other kinds and
/// unknown tags are ignored.
pub fn decode(payload: &Payload, expected: &[InstrumentKind]) -> Decoded {
    let mut snapshot = StationSnapshot {
        station: payload.station.clone(),
        ..Default::default()
    };
    let mut report = DecodeReport::default();

    for &kind in expected {
        let found = match kind {
            InstrumentKind::Wind => load_into(payload, &mut snapshot.wind),
            InstrumentKind::Gps => load_into(payload, &mut snapshot.gps),
            InstrumentKind::Flow => load_into(payload, &mut snapshot.flow),
            InstrumentKind::Sonde => load_into(payload, &mut snapshot.sonde),
            InstrumentKind::Depth => load_into(payload, &mut snapshot.depth),
        };

        if found == 0 {
            warn!(station = %payload.station, kind = %kind, "Failed to locate element");
            if !report.missing.contains(&kind) {
                report.missing.push(kind);
            }
        } else {
            debug!(station = %payload.station, kind = %kind, count = found, "Decoded readings");
        }
    }

    Decoded { snapshot, report }
}

fn load_into<R: Reading>(payload: &Payload, out: &mut Vec<R>) -> usize {
    out.clear();
    out.extend(payload.elements_for(R::KIND).map(R::from_element));
    out.len()
}
