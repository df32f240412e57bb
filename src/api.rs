//! HTTP boundary.
//!
//! Translates requests into [`TelemetryHandle`] calls and results into JSON
//! responses. Holds no state of its own.

use std::num::IntErrorKind;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::{normalize_path::NormalizePath, trace::TraceLayer};
use tracing::error;

use crate::{
    query::{ListParams, TelemetryList},
    record::TelemetryRecord,
    runtime::handle::{RuntimeError, TelemetryHandle},
    service::ServiceError,
    types::TelemetryId,
};

/// Router with the telemetry routes, tracing, and shared state.
///
/// Trailing slashes are handled by [`app`], which wraps this router.
pub fn router(handle: TelemetryHandle) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/telemetry", get(list_telemetry).post(create_telemetry))
        .route(
            "/telemetry/{id}",
            get(get_telemetry).delete(delete_telemetry),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(handle)
}

/// [`router`] with trailing slashes trimmed before routing.
pub fn app(handle: TelemetryHandle) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router(handle))
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

async fn list_telemetry(
    State(handle): State<TelemetryHandle>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<TelemetryList>, ApiError> {
    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let list = handle.list(list_params(&pairs)).await?;
    Ok(Json(list))
}

async fn get_telemetry(
    State(handle): State<TelemetryHandle>,
    Path(id): Path<String>,
) -> Result<Json<TelemetryRecord>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(handle.get(id).await?))
}

async fn create_telemetry(
    State(handle): State<TelemetryHandle>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let id = handle.create(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: "Telemetry entry added",
        }),
    ))
}

async fn delete_telemetry(
    State(handle): State<TelemetryHandle>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    handle.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Telemetry entry deleted",
    }))
}

/// Builds list parameters from query pairs. The first occurrence of a key
/// wins. Integers outside `i64` saturate; values that are not integers are
/// treated as absent.
pub fn list_params(pairs: &[(String, String)]) -> ListParams {
    let first = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };
    let int = |key: &str| first(key).and_then(|v| parse_int(&v));

    ListParams {
        satellite_id: first("satelliteId"),
        status: first("status"),
        page: int("page"),
        per_page: int("per_page"),
        sort_by: first("sort_by"),
        sort_order: first("sort_order"),
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

// Non-numeric ids cannot name a record.
fn parse_id(raw: &str) -> Result<TelemetryId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

/// Error response mapped from runtime failures.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with the given message.
    BadRequest(String),
    /// 404.
    NotFound,
    /// 500; details are logged, not returned.
    Internal,
}

impl From<RuntimeError> for ApiError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::Service(ServiceError::Validation(v)) => ApiError::BadRequest(v.to_string()),
            RuntimeError::Service(ServiceError::NotFound(_)) => ApiError::NotFound,
            other => {
                error!(error = %other, "telemetry request failed");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Telemetry entry not found".to_string()),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct CreatedResponse {
    id: TelemetryId,
    message: &'static str,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}
