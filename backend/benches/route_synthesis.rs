use backend::engine::RouteSafetyEngine;
use backend::routing::{RiskProfile, synthesize_segments};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use shared::{LocationRef, RoutePoint};

fn benchmark_segment_synthesis(c: &mut Criterion) {
    let start = RoutePoint::new(23.8103, 90.4125);
    let end = RoutePoint::new(22.8456, 89.5403);

    let mut group = c.benchmark_group("segment_synthesis");

    let cases = [
        ("short_safe", 40_000u32, RiskProfile::Safe),
        ("long_medium", 270_000, RiskProfile::Medium),
        ("long_dangerous", 270_000, RiskProfile::Dangerous),
    ];

    for (name, distance, profile) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &distance, |b, &distance| {
            b.iter(|| synthesize_segments(black_box(&start), black_box(&end), distance, profile));
        });
    }

    group.finish();
}

fn benchmark_deterministic_route_generation(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let engine = RouteSafetyEngine::new(None);
    let start = LocationRef::Name("Dhaka".to_string());
    let end = LocationRef::Name("Khulna".to_string());

    c.bench_function("find_safe_routes_deterministic", |b| {
        b.iter(|| rt.block_on(engine.find_safe_routes(black_box(&start), black_box(&end))));
    });
}

criterion_group!(
    benches,
    benchmark_segment_synthesis,
    benchmark_deterministic_route_generation
);
criterion_main!(benches);
