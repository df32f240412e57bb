use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use satlog::{
    query::{Sort, TelemetryFilter, TelemetryQuery},
    record::TelemetryDraft,
    store::{TelemetryStore, memory::MemoryStore, sqlite::SqliteStore},
    types::{HealthStatus, SortColumn, SortOrder},
};

fn draft(i: u64) -> TelemetryDraft {
    TelemetryDraft {
        satellite_id: format!("SAT{:03}", i % 50),
        timestamp: format!("2025-12-10T10:{:02}:{:02}Z", (i / 60) % 60, i % 60),
        altitude: 380.0 + (i % 200) as f64,
        velocity: 7.5 + (i % 10) as f64 / 10.0,
        status: HealthStatus::parse(HealthStatus::ALLOWED[(i % 2) as usize]).expect("status"),
    }
}

fn bench_inserts(c: &mut Criterion) {
    c.bench_function("memory_insert_50k", |b| {
        b.iter(|| {
            let mut store = MemoryStore::new();
            for i in 0..50_000u64 {
                let _ = store.insert(draft(i)).expect("insert");
            }
        });
    });

    c.bench_function("sqlite_insert_5k", |b| {
        b.iter(|| {
            let mut store = SqliteStore::open_in_memory().expect("sqlite");
            for i in 0..5_000u64 {
                let _ = store.insert(draft(i)).expect("insert");
            }
        });
    });
}

fn bench_sorted_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_page");
    let mut memory = MemoryStore::new();
    let mut sqlite = SqliteStore::open_in_memory().expect("sqlite");
    for i in 0..20_000u64 {
        let _ = memory.insert(draft(i)).expect("insert");
        let _ = sqlite.insert(draft(i)).expect("insert");
    }

    for per_page in [10u32, 100u32] {
        let query = TelemetryQuery {
            filter: TelemetryFilter {
                satellite_id: Some("SAT007".to_string()),
                status: None,
            },
            sort: Sort {
                column: SortColumn::Altitude,
                order: SortOrder::Desc,
            },
            page: 2,
            per_page,
        };
        group.bench_with_input(BenchmarkId::new("memory", per_page), &query, |b, q| {
            b.iter(|| {
                let _ = memory.query(q).expect("query");
            });
        });
        group.bench_with_input(BenchmarkId::new("sqlite", per_page), &query, |b, q| {
            b.iter(|| {
                let _ = sqlite.query(q).expect("query");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_inserts, bench_sorted_page);
criterion_main!(benches);
