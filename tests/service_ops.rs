use serde_json::{Value, json};

use satlog::{
    query::ListParams,
    service::{ServiceError, TelemetryService},
    store::{memory::MemoryStore, sqlite::SqliteStore},
    types::{SortColumn, SortOrder},
    validate::ValidationError,
};

fn body(sat: &str, altitude: f64, status: &str) -> Value {
    json!({
        "satelliteId": sat,
        "timestamp": "2025-12-10T10:00:00Z",
        "altitude": altitude,
        "velocity": 7.8,
        "status": status,
    })
}

fn service() -> TelemetryService {
    TelemetryService::new(Box::new(MemoryStore::new()))
}

#[test]
fn create_then_get_round_trips_fields() {
    let mut svc = TelemetryService::new(Box::new(SqliteStore::open_in_memory().expect("sqlite")));
    let id = svc
        .create(&json!({
            "satelliteId": "SAT001",
            "timestamp": "2025-12-10T10:00:00Z",
            "altitude": 400,
            "velocity": 7.8,
            "status": "healthy",
        }))
        .expect("create");
    assert_eq!(id, 1);

    let rec = svc.get(id).expect("get");
    assert_eq!(rec.id, 1);
    assert_eq!(rec.satellite_id, "SAT001");
    assert_eq!(rec.timestamp, "2025-12-10T10:00:00Z");
    assert_eq!(rec.altitude, 400.0);
    assert_eq!(rec.velocity, 7.8);
    assert_eq!(rec.status.as_str(), "healthy");
}

#[test]
fn rejected_create_leaves_store_unchanged() {
    let mut svc = service();
    svc.create(&body("SAT001", 400.0, "healthy")).expect("create");

    let err = svc.create(&body("SAT001", 400.0, "warning")).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ValidationError::InvalidStatus)));

    let mut bad_ts = body("SAT001", 400.0, "healthy");
    bad_ts["timestamp"] = json!("2025/12/10");
    let err = svc.create(&bad_ts).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(ValidationError::InvalidTimestamp)));

    let list = svc.list(&ListParams::default()).expect("list");
    assert_eq!(list.pagination.total, 1);
}

#[test]
fn get_missing_is_not_found() {
    let svc = service();
    assert!(matches!(svc.get(7), Err(ServiceError::NotFound(7))));
}

#[test]
fn delete_twice_is_success_then_not_found() {
    let mut svc = service();
    let id = svc.create(&body("SAT001", 400.0, "healthy")).expect("create");

    svc.delete(id).expect("first delete");
    assert!(matches!(svc.delete(id), Err(ServiceError::NotFound(_))));
    assert!(matches!(svc.get(id), Err(ServiceError::NotFound(_))));
}

#[test]
fn list_defaults_and_totals() {
    let mut svc = service();
    for i in 0..45 {
        svc.create(&body("SAT001", f64::from(i), "healthy")).expect("create");
    }

    let list = svc.list(&ListParams::default()).expect("list");
    assert_eq!(list.data.len(), 20);
    assert_eq!(list.pagination.page, 1);
    assert_eq!(list.pagination.per_page, 20);
    assert_eq!(list.pagination.total, 45);
    assert_eq!(list.pagination.total_pages, 3);
    assert_eq!(list.sorting.sort_by, SortColumn::Id);
    assert_eq!(list.sorting.sort_order, SortOrder::Asc);

    let last = svc
        .list(&ListParams {
            page: Some(3),
            ..ListParams::default()
        })
        .expect("list");
    assert_eq!(last.data.len(), 5);
}

#[test]
fn empty_store_has_zero_pages() {
    let svc = service();
    let list = svc.list(&ListParams::default()).expect("list");
    assert!(list.data.is_empty());
    assert_eq!(list.pagination.total, 0);
    assert_eq!(list.pagination.total_pages, 0);
}

#[test]
fn out_of_range_parameters_are_coerced() {
    let mut svc = service();
    svc.create(&body("SAT001", 1.0, "healthy")).expect("create");

    let cases = [
        (Some(0), None, 1, 20),
        (Some(-5), None, 1, 20),
        (None, Some(0), 1, 1),
        (None, Some(-3), 1, 1),
        (None, Some(500), 1, 100),
    ];
    for (page, per_page, want_page, want_per_page) in cases {
        let list = svc
            .list(&ListParams {
                page,
                per_page,
                ..ListParams::default()
            })
            .expect("list never fails");
        assert_eq!(list.pagination.page, want_page);
        assert_eq!(list.pagination.per_page, want_per_page);
    }

    let list = svc
        .list(&ListParams {
            sort_by: Some("bogus".to_string()),
            sort_order: Some("bogus".to_string()),
            ..ListParams::default()
        })
        .expect("list never fails");
    assert_eq!(list.sorting.sort_by, SortColumn::Id);
    assert_eq!(list.sorting.sort_order, SortOrder::Asc);

    let list = svc
        .list(&ListParams {
            sort_by: Some("altitude".to_string()),
            sort_order: Some("DESC".to_string()),
            ..ListParams::default()
        })
        .expect("list");
    assert_eq!(list.sorting.sort_by, SortColumn::Altitude);
    assert_eq!(list.sorting.sort_order, SortOrder::Desc);
}

#[test]
fn altitude_desc_is_non_increasing() {
    let mut svc = service();
    for alt in [400.0, 550.5, 12.0, 550.5, 380.25, 0.0] {
        svc.create(&body("SAT001", alt, "critical")).expect("create");
    }

    let list = svc
        .list(&ListParams {
            sort_by: Some("altitude".to_string()),
            sort_order: Some("desc".to_string()),
            ..ListParams::default()
        })
        .expect("list");
    assert!(list.data.windows(2).all(|w| w[0].altitude >= w[1].altitude));
}

#[test]
fn filters_apply_literally_and_empty_means_absent() {
    let mut svc = service();
    svc.create(&body("SAT001", 1.0, "healthy")).expect("create");
    svc.create(&body("SAT002", 2.0, "critical")).expect("create");
    svc.create(&body("SAT001", 3.0, "critical")).expect("create");

    let list = svc
        .list(&ListParams {
            satellite_id: Some("SAT001".to_string()),
            status: Some("critical".to_string()),
            ..ListParams::default()
        })
        .expect("list");
    assert_eq!(list.data.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);

    let list = svc
        .list(&ListParams {
            status: Some("CRITICAL".to_string()),
            ..ListParams::default()
        })
        .expect("list");
    assert_eq!(list.pagination.total, 0);

    let list = svc
        .list(&ListParams {
            satellite_id: Some(String::new()),
            status: Some(String::new()),
            ..ListParams::default()
        })
        .expect("list");
    assert_eq!(list.pagination.total, 3);
}
