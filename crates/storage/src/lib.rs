//! Reading sources for the station monitor.
//!
//! Provides:
//! - [`ReadingSource`], the "most recent N rows" access contract
//! - [`Catalog`], the PostgreSQL implementation over per-station instrument tables
//! - [`MemorySource`], an in-memory implementation for tests and demos
//! - [`encode_station`], which turns a station's latest rows into a wire payload

pub mod catalog;
pub mod encoder;
pub mod source;

pub use catalog::{latest_rows_sql, Catalog};
pub use encoder::encode_station;
pub use source::{MemorySource, ReadingSource};
