//! Instrument tables in PostgreSQL.
//!
//! Each station owns one table per instrument kind, named
//! `{table_prefix}_{suffix}` (`cherrybranch_wind`, `cherrybranch_cast`, ...).
//! Columns are read back as text so the payload carries exactly what the
//! database stored.

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tracing::debug;

use reading_protocol::{Element, InstrumentKind};
use station_common::{validate_identifier, StationError, StationResult};

use crate::source::ReadingSource;

/// Database connection pool over the instrument tables.
pub struct Catalog {
    pool: PgPool,
}

impl Catalog {
    /// Create a new catalog connection from database URL.
    pub async fn connect(database_url: &str, max_connections: u32) -> StationResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StationError::DatabaseError(format!("Connection failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the "most recent rows" query for one instrument table.
///
/// The table prefix is spliced into the statement, so it must be a plain
/// identifier. The row limit is bound as `$1`.
pub fn latest_rows_sql(table_prefix: &str, kind: InstrumentKind) -> StationResult<String> {
    validate_identifier(table_prefix)?;

    let columns = kind
        .attributes()
        .iter()
        .map(|name| format!("\"{0}\"::text AS \"{0}\"", name))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "SELECT {} FROM {}_{} ORDER BY \"{}\" DESC LIMIT $1",
        columns,
        table_prefix,
        kind.table_suffix(),
        kind.time_attribute()
    ))
}

#[async_trait]
impl ReadingSource for Catalog {
    async fn latest_rows(
        &self,
        table_prefix: &str,
        kind: InstrumentKind,
        limit: usize,
    ) -> StationResult<Vec<Element>> {
        let sql = latest_rows_sql(table_prefix, kind)?;
        debug!(table_prefix, kind = %kind, limit, "Querying latest rows");

        let rows = sqlx::query(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                StationError::DatabaseError(format!(
                    "Failed to search {}_{}: {}",
                    table_prefix,
                    kind.table_suffix(),
                    e
                ))
            })?;

        let mut elements = Vec::with_capacity(rows.len());
        for row in rows {
            let mut element = Element::new(kind);
            for &name in kind.attributes() {
                let value: Option<String> = row
                    .try_get(name)
                    .map_err(|e| StationError::DatabaseError(format!("Column {}: {}", name, e)))?;
                if let Some(value) = value {
                    element.set_attr(name, value);
                }
            }
            elements.push(element);
        }

        Ok(elements)
    }

    async fn ping(&self) -> StationResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StationError::DatabaseError(format!("Query failed: {}", e)))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
