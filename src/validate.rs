//! Input validation for telemetry creation.
//!
//! Every function here is total: malformed input yields `false` or a
//! [`ValidationError`], never a panic.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};

use crate::{record::TelemetryDraft, types::HealthStatus};

/// Create-payload fields, in the order their presence is checked.
pub const REQUIRED_FIELDS: [&str; 5] = ["satelliteId", "timestamp", "altitude", "velocity", "status"];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Reason a create payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Body was valid JSON but not an object.
    #[error("Request body must be a JSON object.")]
    NotAnObject,
    /// First required field absent from the body.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// `satelliteId` was not a non-empty string.
    #[error("satelliteId must be a non-empty string.")]
    InvalidSatelliteId,
    /// `timestamp` was not an ISO 8601 date-time string.
    #[error("Invalid timestamp format. Must be ISO 8601.")]
    InvalidTimestamp,
    /// `status` was not in the allow-list.
    #[error("Status must be {}.", HealthStatus::allowed_list())]
    InvalidStatus,
    /// A numeric field held something other than a JSON number.
    #[error("{0} must be numeric.")]
    NotNumeric(&'static str),
    /// A numeric field was below zero.
    #[error("{0} must be non-negative.")]
    Negative(&'static str),
}

impl ValidationError {
    /// The offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotAnObject => None,
            ValidationError::MissingField(f)
            | ValidationError::NotNumeric(f)
            | ValidationError::Negative(f) => Some(f),
            ValidationError::InvalidSatelliteId => Some("satelliteId"),
            ValidationError::InvalidTimestamp => Some("timestamp"),
            ValidationError::InvalidStatus => Some("status"),
        }
    }
}

/// Returns true when `value` is an ISO 8601 date-time.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]` followed by nothing, `Z`, or a
/// `±HH:MM` offset. The calendar date must exist.
pub fn validate_timestamp(value: &str) -> bool {
    if !has_date_shape(value) {
        return false;
    }

    let value = match value.strip_suffix('Z') {
        Some(rest) => Cow::Owned(format!("{rest}+00:00")),
        None => Cow::Borrowed(value),
    };

    OFFSET_FORMATS
        .iter()
        .any(|fmt| DateTime::parse_from_str(&value, fmt).is_ok())
        || NAIVE_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(&value, fmt).is_ok())
}

/// JSON form of [`validate_timestamp`]; absent, null, and non-string values fail.
pub fn validate_timestamp_value(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(validate_timestamp)
}

/// Returns true when `value` is exactly one of [`HealthStatus::ALLOWED`].
pub fn validate_status(value: &str) -> bool {
    HealthStatus::parse(value).is_some()
}

/// JSON form of [`validate_status`]; absent, null, and non-string values fail.
pub fn validate_status_value(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).is_some_and(validate_status)
}

/// Checks an untyped create body and produces the draft to insert.
pub fn validate_create(body: &Value) -> Result<TelemetryDraft, ValidationError> {
    let obj = body.as_object().ok_or(ValidationError::NotAnObject)?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !obj.contains_key(**f)) {
        return Err(ValidationError::MissingField(*missing));
    }

    let satellite_id = obj
        .get("satelliteId")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::InvalidSatelliteId)?;

    if !validate_timestamp_value(obj.get("timestamp")) {
        return Err(ValidationError::InvalidTimestamp);
    }
    let timestamp = obj
        .get("timestamp")
        .and_then(Value::as_str)
        .ok_or(ValidationError::InvalidTimestamp)?;

    let status = obj
        .get("status")
        .and_then(Value::as_str)
        .and_then(HealthStatus::parse)
        .ok_or(ValidationError::InvalidStatus)?;

    let altitude = number_field(obj, "altitude")?;
    let velocity = number_field(obj, "velocity")?;
    for (name, v) in [("altitude", altitude), ("velocity", velocity)] {
        if v < 0.0 {
            return Err(ValidationError::Negative(name));
        }
    }

    Ok(TelemetryDraft {
        satellite_id: satellite_id.to_string(),
        timestamp: timestamp.to_string(),
        altitude,
        velocity,
        status,
    })
}

// Numeric strings are rejected on purpose: the schema says `number`.
fn number_field(obj: &Map<String, Value>, name: &'static str) -> Result<f64, ValidationError> {
    obj.get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::NotNumeric(name))
}

fn has_date_shape(value: &str) -> bool {
    let b = value.as_bytes();
    b.len() > 11
        && b[4] == b'-'
        && b[7] == b'-'
        && b[10] == b'T'
        && [0, 1, 2, 3, 5, 6, 8, 9].iter().all(|&i| b[i].is_ascii_digit())
}
