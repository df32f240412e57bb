//! Shared primitive IDs, the health status allow-list, and sort keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned telemetry identifier. Matches the SQLite rowid width.
pub type TelemetryId = i64;

/// A status string outside [`HealthStatus::ALLOWED`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown health status: {0:?}")]
pub struct UnknownStatus(pub String);

/// Health classification of a telemetry record.
///
/// Held as the validated wire string rather than a closed enum so that new
/// classifications only need an entry in [`HealthStatus::ALLOWED`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HealthStatus(String);

impl HealthStatus {
    /// Every accepted status value. Matching is case-sensitive.
    pub const ALLOWED: &'static [&'static str] = &["healthy", "critical"];

    /// Returns the status when `value` is exactly one of [`Self::ALLOWED`].
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALLOWED
            .contains(&value)
            .then(|| Self(value.to_string()))
    }

    /// Wire representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `either "a" or "b"` rendering of the allow-list for error messages.
    pub fn allowed_list() -> String {
        let quoted: Vec<String> = Self::ALLOWED.iter().map(|s| format!("\"{s}\"")).collect();
        match quoted.split_last() {
            Some((last, [])) => last.clone(),
            Some((last, [only])) => format!("either {only} or {last}"),
            Some((last, rest)) => format!("{}, or {last}", rest.join(", ")),
            None => String::new(),
        }
    }
}

impl TryFrom<String> for HealthStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&value.as_str()) {
            Ok(Self(value))
        } else {
            Err(UnknownStatus(value))
        }
    }
}

impl From<HealthStatus> for String {
    fn from(value: HealthStatus) -> Self {
        value.0
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Column a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    /// Store identity (default).
    #[default]
    Id,
    /// Satellite identifier.
    SatelliteId,
    /// Timestamp string, compared lexically.
    Timestamp,
    /// Altitude.
    Altitude,
    /// Velocity.
    Velocity,
    /// Health status string.
    Status,
}

impl SortColumn {
    /// The sort allow-list.
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Id,
        SortColumn::SatelliteId,
        SortColumn::Timestamp,
        SortColumn::Altitude,
        SortColumn::Velocity,
        SortColumn::Status,
    ];

    /// Column name, identical on the wire and in the SQLite table.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::SatelliteId => "satelliteId",
            SortColumn::Timestamp => "timestamp",
            SortColumn::Altitude => "altitude",
            SortColumn::Velocity => "velocity",
            SortColumn::Status => "status",
        }
    }

    /// Exact, case-sensitive lookup in the allow-list.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Case-insensitive parse of `asc` / `desc`.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }

    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// SQL keyword.
    pub const fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}
