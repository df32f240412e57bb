//! Telemetry record and insert draft.

use serde::{Deserialize, Serialize};

use crate::types::{HealthStatus, TelemetryId};

/// One stored telemetry reading. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    /// Store-assigned identity.
    pub id: TelemetryId,
    /// Satellite the reading belongs to.
    pub satellite_id: String,
    /// ISO 8601 timestamp, kept exactly as submitted.
    pub timestamp: String,
    /// Altitude, never negative.
    pub altitude: f64,
    /// Velocity, never negative.
    pub velocity: f64,
    /// Health classification.
    pub status: HealthStatus,
}

/// Validated insert payload used to create a new [`TelemetryRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryDraft {
    /// Satellite the reading belongs to.
    pub satellite_id: String,
    /// ISO 8601 timestamp.
    pub timestamp: String,
    /// Altitude.
    pub altitude: f64,
    /// Velocity.
    pub velocity: f64,
    /// Health classification.
    pub status: HealthStatus,
}

impl TelemetryDraft {
    /// Materializes the draft under the identity the store assigned.
    pub fn into_record(self, id: TelemetryId) -> TelemetryRecord {
        TelemetryRecord {
            id,
            satellite_id: self.satellite_id,
            timestamp: self.timestamp,
            altitude: self.altitude,
            velocity: self.velocity,
            status: self.status,
        }
    }
}
