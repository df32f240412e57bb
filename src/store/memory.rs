//! Ordered in-memory telemetry table, used for tests and ephemeral runs.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use hashbrown::HashMap;

use crate::{
    query::TelemetryQuery,
    record::{TelemetryDraft, TelemetryRecord},
    types::{SortColumn, SortOrder, TelemetryId},
};

use super::{QueryPage, StoreResult, TelemetryStore};

/// In-memory implementation of [`crate::store::TelemetryStore`].
#[derive(Debug)]
pub struct MemoryStore {
    records: BTreeMap<TelemetryId, TelemetryRecord>,
    by_satellite: HashMap<String, Vec<TelemetryId>>,
    next_id: TelemetryId,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store whose first identity is 1.
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            by_satellite: HashMap::new(),
            next_id: 1,
        }
    }

    fn candidates(&self, satellite_id: Option<&str>) -> Vec<&TelemetryRecord> {
        match satellite_id {
            Some(sat) => self
                .by_satellite
                .get(sat)
                .into_iter()
                .flat_map(|ids| ids.iter())
                .filter_map(|id| self.records.get(id))
                .collect(),
            None => self.records.values().collect(),
        }
    }

    fn remove_from_index(&mut self, satellite_id: &str, id: TelemetryId) {
        if let Some(ids) = self.by_satellite.get_mut(satellite_id) {
            if let Some(pos) = ids.iter().position(|x| *x == id) {
                ids.remove(pos);
            }
            if ids.is_empty() {
                self.by_satellite.remove(satellite_id);
            }
        }
    }
}

impl TelemetryStore for MemoryStore {
    fn insert(&mut self, draft: TelemetryDraft) -> StoreResult<TelemetryId> {
        let id = self.next_id;
        self.next_id += 1;

        self.by_satellite
            .entry(draft.satellite_id.clone())
            .or_default()
            .push(id);
        self.records.insert(id, draft.into_record(id));
        Ok(id)
    }

    fn get(&self, id: TelemetryId) -> StoreResult<Option<TelemetryRecord>> {
        Ok(self.records.get(&id).cloned())
    }

    fn delete(&mut self, id: TelemetryId) -> StoreResult<bool> {
        let Some(rec) = self.records.remove(&id) else {
            return Ok(false);
        };
        self.remove_from_index(&rec.satellite_id, id);
        Ok(true)
    }

    fn query(&self, query: &TelemetryQuery) -> StoreResult<QueryPage> {
        let mut rows: Vec<&TelemetryRecord> = self
            .candidates(query.filter.satellite_id.as_deref())
            .into_iter()
            .filter(|r| {
                query
                    .filter
                    .status
                    .as_deref()
                    .is_none_or(|s| r.status.as_str() == s)
            })
            .collect();

        rows.sort_by(|a, b| {
            let primary = compare_by(a, b, query.sort.column);
            let primary = match query.sort.order {
                SortOrder::Asc => primary,
                SortOrder::Desc => primary.reverse(),
            };
            primary.then(a.id.cmp(&b.id))
        });

        let total = rows.len() as u64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let records = rows
            .into_iter()
            .skip(offset)
            .take(query.per_page as usize)
            .cloned()
            .collect();

        Ok(QueryPage { records, total })
    }
}

fn compare_by(a: &TelemetryRecord, b: &TelemetryRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::SatelliteId => a.satellite_id.cmp(&b.satellite_id),
        SortColumn::Timestamp => a.timestamp.cmp(&b.timestamp),
        SortColumn::Altitude => a.altitude.partial_cmp(&b.altitude).unwrap_or(Ordering::Equal),
        SortColumn::Velocity => a.velocity.partial_cmp(&b.velocity).unwrap_or(Ordering::Equal),
        SortColumn::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}
