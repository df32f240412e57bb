/// Ordered in-memory store.
pub mod memory;
/// SQLite-backed store.
pub mod sqlite;

use crate::{
    query::TelemetryQuery,
    record::{TelemetryDraft, TelemetryRecord},
    types::TelemetryId,
};

/// Failure inside a storage engine.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// SQLite reported an error.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A persisted row could not be decoded into a record.
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// One page of a scan plus the filtered row count before pagination.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryPage {
    /// Rows on the requested page, in the requested order.
    pub records: Vec<TelemetryRecord>,
    /// Rows matching the filter across all pages.
    pub total: u64,
}

/// Durable table of telemetry records.
///
/// Identities are assigned on insert, increase monotonically, and are never
/// reused after a delete. Each mutating call is atomic.
pub trait TelemetryStore: Send {
    /// Appends a row and returns its new identity.
    fn insert(&mut self, draft: TelemetryDraft) -> StoreResult<TelemetryId>;
    /// Point lookup.
    fn get(&self, id: TelemetryId) -> StoreResult<Option<TelemetryRecord>>;
    /// Removes the row if present; reports whether it existed.
    fn delete(&mut self, id: TelemetryId) -> StoreResult<bool>;
    /// Filtered, sorted, paginated scan.
    fn query(&self, query: &TelemetryQuery) -> StoreResult<QueryPage>;
}
