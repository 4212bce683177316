use birken_temp::{
    align, ForecastError, ForecastRequest, ForecastSample, ForecastSource, Joiner, LatLon,
    TrackPoint,
};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::num::NonZeroUsize;

struct ConstantForecast;

impl ForecastSource for ConstantForecast {
    async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastSample, ForecastError> {
        Ok(ForecastSample::new(request.at, request.location, -6.0, -2.0)?)
    }
}

fn track(len: usize) -> Vec<TrackPoint> {
    let t0 = Utc.with_ymd_and_hms(2023, 3, 18, 0, 0, 0).unwrap();
    (0..len)
        .map(|i| TrackPoint {
            sequence_index: i,
            original_timestamp: t0 + Duration::seconds(i as i64 * 5),
            distance_m: i as f64 * 12.0,
            elevation_m: 250.0 + (i % 400) as f64,
            location: LatLon(61.0 + i as f64 * 0.0001, 11.0),
        })
        .collect()
}

fn bench_align_join(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let start = Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap();
    let joiner = Joiner::new(NonZeroUsize::new(24).unwrap());
    let route = track(5_000);

    c.bench_function("align_5000", |b| {
        b.iter(|| align(black_box(route.clone()), start))
    });

    let aligned = align(route.clone(), start);
    c.bench_function("join_5000_res24", |b| {
        b.to_async(&runtime)
            .iter(|| async { joiner.join(&ConstantForecast, black_box(&aligned)).await })
    });
}

criterion_group!(benches, bench_align_join);
criterion_main!(benches);
