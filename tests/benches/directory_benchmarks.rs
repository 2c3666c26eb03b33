//! # Wayfi Benchmarks
//!
//! | Subsystem | Operation | Expectation |
//! |-----------|-----------|-------------|
//! | wf-01 Network Directory | haversine distance | sub-microsecond |
//! | wf-01 Network Directory | nearby search, in-memory | linear in records |
//! | wf-02 Waypoint Fan-out | suggestion extraction | linear in reply length |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use wf_01_network_directory::{
    haversine_km, DirectoryApi, DirectoryConfig, DirectoryService, GeoPoint, InMemoryRecordStore,
    Location, RegisterRequest,
};
use wf_02_waypoint_fanout::parse_suggestion;

const CENTER_LAT: f64 = 37.8;
const CENTER_LON: f64 = -122.4;

// ============================================================================
// WF-01: Distance
// ============================================================================

fn bench_haversine(c: &mut Criterion) {
    let mut group = c.benchmark_group("wf-01-haversine");
    let mut rng = rand::thread_rng();

    let pairs: Vec<(f64, f64, f64, f64)> = (0..1000)
        .map(|_| {
            (
                rng.gen_range(-90.0..90.0),
                rng.gen_range(-180.0..180.0),
                rng.gen_range(-90.0..90.0),
                rng.gen_range(-180.0..180.0),
            )
        })
        .collect();

    group.bench_function("single", |b| {
        b.iter(|| {
            black_box(haversine_km(
                black_box(CENTER_LAT),
                black_box(CENTER_LON),
                black_box(37.81),
                black_box(-122.41),
            ))
        })
    });

    group.throughput(Throughput::Elements(pairs.len() as u64));
    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            let total: f64 = pairs
                .iter()
                .map(|&(lat1, lon1, lat2, lon2)| haversine_km(lat1, lon1, lat2, lon2))
                .sum();
            black_box(total)
        })
    });

    group.finish();
}

// ============================================================================
// WF-01: Nearby search
// ============================================================================

fn seeded_directory(
    runtime: &tokio::runtime::Runtime,
    records: usize,
) -> DirectoryService<InMemoryRecordStore> {
    let directory = DirectoryService::new(
        DirectoryConfig::default(),
        Arc::new(InMemoryRecordStore::new()),
    );
    let mut rng = rand::thread_rng();

    runtime.block_on(async {
        for i in 0..records {
            let lat = CENTER_LAT + rng.gen_range(-0.2..0.2);
            let lon = CENTER_LON + rng.gen_range(-0.2..0.2);
            let _ = directory
                .register(RegisterRequest {
                    ssid: format!("net-{i}"),
                    credential: "secret".to_string(),
                    location: Location {
                        kind: "Point".to_string(),
                        coordinates: vec![lon, lat],
                        address: format!("{i} Bench St"),
                    },
                    description: "benchmark record".to_string(),
                })
                .await;
        }
    });
    directory
}

fn bench_nearby_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("wf-01-nearby-search");
    group.measurement_time(Duration::from_secs(5));

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => panic!("failed to build runtime: {e}"),
    };
    let center = match GeoPoint::new(CENTER_LAT, CENTER_LON) {
        Ok(point) => point,
        Err(e) => panic!("bad bench center: {e}"),
    };

    for size in [100usize, 1_000, 10_000] {
        let directory = seeded_directory(&runtime, size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("radius_5km", size), &directory, |b, dir| {
            b.iter(|| {
                let found = runtime.block_on(dir.nearby_at(center, Some(5.0)));
                black_box(found.map(|v| v.len()).unwrap_or(0))
            })
        });
    }

    group.finish();
}

// ============================================================================
// WF-02: Suggestion extraction
// ============================================================================

fn bench_parse_suggestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("wf-02-parse-suggestion");

    for stops in [3usize, 10, 50] {
        let entries: Vec<String> = (0..stops)
            .map(|i| {
                format!(
                    r#"{{"latitude": {}, "longitude": {}, "name": "Stop {i}"}}"#,
                    CENTER_LAT + i as f64 * 0.001,
                    CENTER_LON
                )
            })
            .collect();
        let reply = format!(
            "Here you go!\n```json\n{{\"stops\": [{}], \"route_description\": \"bench\"}}\n```",
            entries.join(",")
        );

        group.throughput(Throughput::Bytes(reply.len() as u64));
        group.bench_with_input(BenchmarkId::new("fenced_reply", stops), &reply, |b, text| {
            b.iter(|| black_box(parse_suggestion(text).map(|r| r.stops.len())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine,
    bench_nearby_search,
    bench_parse_suggestion,
);

criterion_main!(benches);
