//! The four telemetry operations over an injected store.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    query::{ListParams, Pagination, Sorting, TelemetryList, normalize, total_pages},
    record::TelemetryRecord,
    store::{StoreError, TelemetryStore},
    types::TelemetryId,
    validate::{ValidationError, validate_create},
};

/// Failure of a service operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Create payload rejected; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No record with this identity.
    #[error("Telemetry entry not found")]
    NotFound(TelemetryId),
    /// Storage engine failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Stateless orchestration of validation, normalization, and storage.
///
/// Records are never cached between calls; every read goes to the store.
pub struct TelemetryService {
    store: Box<dyn TelemetryStore>,
}

impl TelemetryService {
    /// Wraps `store`.
    pub fn new(store: Box<dyn TelemetryStore>) -> Self {
        Self { store }
    }

    /// Lists one page of records. Caller parameters are normalized, never rejected.
    pub fn list(&self, params: &ListParams) -> ServiceResult<TelemetryList> {
        let query = normalize(params);
        let page = self.store.query(&query)?;
        debug!(
            page = query.page,
            per_page = query.per_page,
            total = page.total,
            returned = page.records.len(),
            "telemetry listed"
        );

        Ok(TelemetryList {
            data: page.records,
            pagination: Pagination {
                page: query.page,
                per_page: query.per_page,
                total: page.total,
                total_pages: total_pages(page.total, query.per_page),
            },
            sorting: Sorting {
                sort_by: query.sort.column,
                sort_order: query.sort.order,
            },
        })
    }

    /// Fetches one record.
    pub fn get(&self, id: TelemetryId) -> ServiceResult<TelemetryRecord> {
        self.store.get(id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Validates `body` and inserts it, returning the new identity.
    pub fn create(&mut self, body: &Value) -> ServiceResult<TelemetryId> {
        let draft = validate_create(body).inspect_err(|err| {
            warn!(field = err.field(), error = %err, "telemetry rejected");
        })?;
        let satellite_id = draft.satellite_id.clone();
        let id = self.store.insert(draft)?;
        info!(id, satellite_id = %satellite_id, "telemetry created");
        Ok(id)
    }

    /// Permanently removes one record.
    pub fn delete(&mut self, id: TelemetryId) -> ServiceResult<()> {
        if !self.store.delete(id)? {
            return Err(ServiceError::NotFound(id));
        }
        info!(id, "telemetry deleted");
        Ok(())
    }
}
