//! Wire payload carrying the latest rows of a station.
//!
//! The payload is a flat, ordered list of tagged elements. Each element is
//! one database row; its attributes are the row's columns as strings.
//! Adding attributes is backward compatible. Renaming or removing an
//! attribute listed in [`InstrumentKind::attributes`] is a breaking change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{ProtocolError, ProtocolResult};
use crate::InstrumentKind;

/// Current payload version.
pub const PAYLOAD_VERSION: u32 = 1;

fn default_version() -> u32 {
    PAYLOAD_VERSION
}

/// One reading row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Instrument kind tag (`wind`, `gps`, `flow`, `sonde`, `depth`).
    pub tag: String,

    /// Column values by name.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

impl Element {
    /// Create an empty element for `kind`.
    pub fn new(kind: InstrumentKind) -> Self {
        Self {
            tag: kind.tag().to_string(),
            attrs: BTreeMap::new(),
        }
    }

    /// Add an attribute (builder pattern).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Get an attribute by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// The instrument kind, if the tag is known.
    pub fn kind(&self) -> Option<InstrumentKind> {
        InstrumentKind::from_tag(&self.tag)
    }
}

/// The latest readings of one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Station identifier.
    pub station: String,

    /// Elements in encoder order.
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Payload {
    /// Create an empty payload for a station.
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            station: station.into(),
            elements: Vec::new(),
        }
    }

    /// Append an element (builder pattern).
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Append an element.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Elements tagged with `kind`, in payload order.
    pub fn elements_for(&self, kind: InstrumentKind) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.tag == kind.tag())
    }

    /// Number of elements tagged with `kind`.
    pub fn count(&self, kind: InstrumentKind) -> usize {
        self.elements_for(kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> ProtocolResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON, rejecting payloads from a newer encoder.
    pub fn from_json(json: &str) -> ProtocolResult<Self> {
        let payload: Payload = serde_json::from_str(json)?;
        if payload.version > PAYLOAD_VERSION {
            return Err(ProtocolError::UnsupportedVersion {
                found: payload.version,
                supported: PAYLOAD_VERSION,
            });
        }
        Ok(payload)
    }
}
