//! SQLite-backed telemetry table.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Row, ToSql, params, types::Type};

use crate::{
    query::TelemetryQuery,
    record::{TelemetryDraft, TelemetryRecord},
    types::{HealthStatus, SortColumn, TelemetryId},
};

use super::{QueryPage, StoreError, StoreResult, TelemetryStore};

const SELECT_COLUMNS: &str = "SELECT id, satelliteId, timestamp, altitude, velocity, status FROM telemetry";

/// SQLite implementation of [`crate::store::TelemetryStore`].
///
/// `AUTOINCREMENT` keeps identities from being reused after deletes, even
/// across restarts.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates a SQLite-backed store at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory SQLite store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    /// Sets how long a write waits on a lock held by another connection.
    pub fn with_busy_timeout(self, timeout: Duration) -> StoreResult<Self> {
        self.conn.busy_timeout(timeout)?;
        Ok(self)
    }

    fn init_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }
}

impl TelemetryStore for SqliteStore {
    fn insert(&mut self, draft: TelemetryDraft) -> StoreResult<TelemetryId> {
        self.conn.execute(
            "INSERT INTO telemetry (satelliteId, timestamp, altitude, velocity, status) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.satellite_id,
                draft.timestamp,
                draft.altitude,
                draft.velocity,
                draft.status.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, id: TelemetryId) -> StoreResult<Option<TelemetryRecord>> {
        self.conn
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], read_record)
            .optional()
            .map_err(decode_error)
    }

    fn delete(&mut self, id: TelemetryId) -> StoreResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM telemetry WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    fn query(&self, query: &TelemetryQuery) -> StoreResult<QueryPage> {
        let limit = i64::from(query.per_page);
        let offset = i64::try_from(query.offset()).unwrap_or(i64::MAX);

        let mut clause = String::from(" WHERE 1=1");
        let mut args: Vec<&dyn ToSql> = Vec::new();
        if let Some(satellite_id) = &query.filter.satellite_id {
            clause.push_str(" AND satelliteId = ?");
            args.push(satellite_id);
        }
        if let Some(status) = &query.filter.status {
            clause.push_str(" AND status = ?");
            args.push(status);
        }

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM telemetry{clause}"),
            args.as_slice(),
            |row| row.get(0),
        )?;

        // Column and direction come from closed enums; never from caller text.
        let mut order_by = format!(" ORDER BY {} {}", query.sort.column.as_str(), query.sort.order.as_sql());
        if query.sort.column != SortColumn::Id {
            order_by.push_str(", id ASC");
        }

        args.push(&limit);
        args.push(&offset);
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS}{clause}{order_by} LIMIT ? OFFSET ?"))?;
        let rows = stmt.query_map(args.as_slice(), read_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(decode_error)?);
        }

        Ok(QueryPage {
            records,
            total: u64::try_from(total).unwrap_or(0),
        })
    }
}

fn read_record(row: &Row<'_>) -> rusqlite::Result<TelemetryRecord> {
    let status: String = row.get(5)?;
    let status = HealthStatus::try_from(status)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(err)))?;

    Ok(TelemetryRecord {
        id: row.get(0)?,
        satellite_id: row.get(1)?,
        timestamp: row.get(2)?,
        altitude: row.get(3)?,
        velocity: row.get(4)?,
        status,
    })
}

fn decode_error(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::FromSqlConversionFailure(_, _, inner) => StoreError::Corrupt(inner.to_string()),
        other => StoreError::Sqlite(other),
    }
}
