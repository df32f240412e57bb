//! List parameters, the normalization policy, and the listing response.
//!
//! Listing never fails on caller input. [`normalize`] is the single place
//! where raw parameters are clamped onto the allow-lists; the values it
//! produces are echoed back in [`TelemetryList`].

use serde::Serialize;

use crate::{
    record::TelemetryRecord,
    types::{SortColumn, SortOrder},
};

/// Page used when none is given.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when none is given.
pub const DEFAULT_PER_PAGE: u32 = 20;
/// Hard cap on page size.
pub const MAX_PER_PAGE: u32 = 100;

/// Raw listing parameters as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Equality filter on satellite id.
    pub satellite_id: Option<String>,
    /// Equality filter on status, applied literally.
    pub status: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size.
    pub per_page: Option<i64>,
    /// Sort column name.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
}

/// Equality predicates, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryFilter {
    /// Match records of this satellite.
    pub satellite_id: Option<String>,
    /// Match records with this status string.
    pub status: Option<String>,
}

/// Ordering applied before pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    /// Primary key; ties fall back to ascending id.
    pub column: SortColumn,
    /// Direction of the primary key.
    pub order: SortOrder,
}

/// Normalized scan request handed to a store.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryQuery {
    pub filter: TelemetryFilter,
    pub sort: Sort,
    /// 1-based page, at least 1.
    pub page: u64,
    /// Rows per page, within `1..=MAX_PER_PAGE`.
    pub per_page: u32,
}

impl Default for TelemetryQuery {
    fn default() -> Self {
        Self {
            filter: TelemetryFilter::default(),
            sort: Sort::default(),
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl TelemetryQuery {
    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(u64::from(self.per_page))
    }
}

/// Clamps raw parameters onto valid ranges and allow-lists.
///
/// Page below 1 becomes 1; page size is clamped to `1..=100`; an unknown
/// sort column becomes `id`; an unknown direction becomes `asc`. Empty
/// filter strings are treated as absent.
pub fn normalize(params: &ListParams) -> TelemetryQuery {
    let page = params
        .page
        .map_or(DEFAULT_PAGE, |p| u64::try_from(p).unwrap_or(0).max(1));
    let per_page = params.per_page.map_or(DEFAULT_PER_PAGE, |n| {
        u32::try_from(n.clamp(1, i64::from(MAX_PER_PAGE))).unwrap_or(MAX_PER_PAGE)
    });
    let column = params
        .sort_by
        .as_deref()
        .and_then(SortColumn::parse)
        .unwrap_or_default();
    let order = params
        .sort_order
        .as_deref()
        .and_then(SortOrder::parse)
        .unwrap_or_default();

    TelemetryQuery {
        filter: TelemetryFilter {
            satellite_id: non_empty(params.satellite_id.as_deref()),
            status: non_empty(params.status.as_deref()),
        },
        sort: Sort { column, order },
        page,
        per_page,
    }
}

/// `ceil(total / per_page)`, zero when there are no rows.
pub fn total_pages(total: u64, per_page: u32) -> u64 {
    total.div_ceil(u64::from(per_page.max(1)))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Applied page and page size, plus `total` rows matching the filter.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sorting {
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
}

/// One page of records plus the parameters that produced it.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryList {
    pub data: Vec<TelemetryRecord>,
    pub pagination: Pagination,
    pub sorting: Sorting,
}
