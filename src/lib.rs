//! Spacecraft telemetry record store with SQLite persistence and a small REST API.
//!
//! # Examples
//!
//! Direct service usage over an in-memory store:
//! ```
//! use satlog::{
//!     query::ListParams,
//!     service::TelemetryService,
//!     store::memory::MemoryStore,
//! };
//! use serde_json::json;
//!
//! let mut service = TelemetryService::new(Box::new(MemoryStore::new()));
//! let id = service.create(&json!({
//!     "satelliteId": "SAT001",
//!     "timestamp": "2025-12-10T10:00:00Z",
//!     "altitude": 400,
//!     "velocity": 7.8,
//!     "status": "healthy",
//! })).expect("create");
//! assert_eq!(id, 1);
//!
//! let page = service.list(&ListParams::default()).expect("list");
//! assert_eq!(page.pagination.total, 1);
//! ```
//!
//! Runtime usage with a SQLite file:
//! ```no_run
//! use satlog::{
//!     runtime::handle::{spawn_telemetry, RuntimeConfig},
//!     service::TelemetryService,
//!     store::sqlite::SqliteStore,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = SqliteStore::open("telemetry.db").expect("open sqlite");
//! let handle = spawn_telemetry(TelemetryService::new(Box::new(store)), RuntimeConfig::default());
//! let record = handle.get(1).await;
//! println!("{record:?}");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// HTTP routes and response mapping.
pub mod api;
/// TOML configuration.
pub mod config;
/// List parameters, normalization, and listing responses.
pub mod query;
/// Telemetry record and draft types.
pub mod record;
/// Single-writer runtime handle.
pub mod runtime;
/// List/get/create/delete orchestration.
pub mod service;
/// Storage abstraction with SQLite and in-memory engines.
pub mod store;
/// Shared primitive types, status allow-list, and sort keys.
pub mod types;
/// Payload validators.
pub mod validate;
