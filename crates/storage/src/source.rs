//! Reading source abstraction and the in-memory implementation.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use reading_protocol::{Element, InstrumentKind, Payload};
use station_common::{StationError, StationResult};

/// Access to the latest instrument rows of a station.
///
/// The only access pattern is "most recent N rows of table T for station S,
/// newest first".
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Fetch up to `limit` of the most recent rows of `kind` from the tables
    /// prefixed by `table_prefix`, ordered by timestamp descending.
    async fn latest_rows(
        &self,
        table_prefix: &str,
        kind: InstrumentKind,
        limit: usize,
    ) -> StationResult<Vec<Element>>;

    /// Check that the source is reachable.
    async fn ping(&self) -> StationResult<()>;

    /// Short name used in logs and readiness output.
    fn name(&self) -> &'static str;
}

fn table_key(table_prefix: &str, kind: InstrumentKind) -> String {
    format!("{}_{}", table_prefix, kind.table_suffix())
}

/// In-memory reading source, used for tests and demo deployments.
#[derive(Default)]
pub struct MemorySource {
    tables: RwLock<HashMap<String, Vec<Element>>>,
    failing: RwLock<HashSet<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one row. Elements with unknown tags are rejected.
    pub async fn insert(&self, table_prefix: &str, element: Element) -> StationResult<()> {
        let kind = element.kind().ok_or_else(|| StationError::InvalidParameter {
            param: "tag".to_string(),
            message: format!("unknown instrument tag '{}'", element.tag),
        })?;

        let mut tables = self.tables.write().await;
        tables
            .entry(table_key(table_prefix, kind))
            .or_default()
            .push(element);
        Ok(())
    }

    /// Insert every element of a payload.
    pub async fn load_payload(&self, table_prefix: &str, payload: &Payload) -> StationResult<()> {
        for element in &payload.elements {
            self.insert(table_prefix, element.clone()).await?;
        }
        Ok(())
    }

    /// Make queries for one table fail, simulating a broken table.
    pub async fn fail_kind(&self, table_prefix: &str, kind: InstrumentKind) {
        self.failing
            .write()
            .await
            .insert(table_key(table_prefix, kind));
    }
}

/// Newest first; rows without a timestamp sort last.
fn newest_first(kind: InstrumentKind, a: &Element, b: &Element) -> Ordering {
    let time = kind.time_attribute();
    match (a.attr(time), b.attr(time)) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl ReadingSource for MemorySource {
    async fn latest_rows(
        &self,
        table_prefix: &str,
        kind: InstrumentKind,
        limit: usize,
    ) -> StationResult<Vec<Element>> {
        let key = table_key(table_prefix, kind);

        if self.failing.read().await.contains(&key) {
            return Err(StationError::DatabaseError(format!(
                "Failed to search {}",
                key
            )));
        }

        let tables = self.tables.read().await;
        let mut rows = tables.get(&key).cloned().unwrap_or_default();
        rows.sort_by(|a, b| newest_first(kind, a, b));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn ping(&self) -> StationResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
