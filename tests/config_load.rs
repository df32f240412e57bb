use std::path::PathBuf;

use tempfile::TempDir;

use satlog::{
    config::{Config, ConfigError},
    query::ListParams,
    service::TelemetryService,
};

#[test]
fn empty_config_uses_defaults() {
    let cfg = Config::from_toml_str("").expect("parse");
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.server.bind, "127.0.0.1:5000");
    assert_eq!(cfg.store.path, PathBuf::from("telemetry.db"));
    assert!(!cfg.store.in_memory);
    assert_eq!(cfg.runtime.queue_bound, 256);
}

#[test]
fn partial_sections_override_only_given_keys() {
    let cfg = Config::from_toml_str(
        r#"
        [server]
        bind = "0.0.0.0:8080"

        [store]
        in_memory = true

        [runtime]
        queue_bound = 8
        "#,
    )
    .expect("parse");
    assert_eq!(cfg.server.bind, "0.0.0.0:8080");
    assert!(cfg.store.in_memory);
    assert_eq!(cfg.store.busy_timeout_ms, 5_000);
    assert_eq!(cfg.runtime.queue_bound, 8);
}

#[test]
fn bad_toml_and_missing_file_are_errors() {
    assert!(matches!(
        Config::from_toml_str("[server]\nbind = 5"),
        Err(ConfigError::Parse(_))
    ));

    let tmp = TempDir::new().expect("tmp");
    assert!(matches!(
        Config::load(tmp.path().join("absent.toml")),
        Err(ConfigError::Read { .. })
    ));
}

#[test]
fn configured_store_opens_and_persists() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("cfg.db");
    let cfg_path = tmp.path().join("satlog.toml");
    std::fs::write(
        &cfg_path,
        format!("[store]\npath = {:?}\n", db_path.to_string_lossy()),
    )
    .expect("write config");

    let cfg = Config::load(&cfg_path).expect("load");
    let mut svc = TelemetryService::new(cfg.store.open().expect("open"));
    svc.create(&serde_json::json!({
        "satelliteId": "SAT001",
        "timestamp": "2025-12-10T10:00:00Z",
        "altitude": 400,
        "velocity": 7.8,
        "status": "critical",
    }))
    .expect("create");
    drop(svc);

    let svc = TelemetryService::new(cfg.store.open().expect("reopen"));
    let list = svc.list(&ListParams::default()).expect("list");
    assert_eq!(list.pagination.total, 1);
    assert!(db_path.exists());
}
