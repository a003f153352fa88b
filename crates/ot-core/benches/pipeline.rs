//! Criterion benchmarks for the classification pipeline in `ot-core`.
//!
//! Benchmarks period aggregation for one long series and the full
//! recomputation (countries, global summary, status counts) at
//! increasing country counts.

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ot_config::EngineConfig;
use ot_core::{aggregate_periods, run_pipeline, DailyObservation, DailySeries, NamedSeries};

fn series(seed: u64, days: u64) -> DailySeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
    let observations = (0..days).map(|day| {
        let value = ((day * 37 + seed * 11) % 500) as i64 - 20;
        DailyObservation::new(start.checked_add_days(Days::new(day)).unwrap(), value)
    });
    DailySeries::from_observations("bench", observations).unwrap()
}

fn countries(count: u64) -> Vec<NamedSeries> {
    (0..count)
        .map(|i| NamedSeries::new(format!("country-{}", i), series(i, 365)))
        .collect()
}

fn bench_aggregate_periods(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/aggregate_periods");

    for days in [30u64, 365, 1500] {
        let s = series(1, days);
        group.bench_with_input(BenchmarkId::new("days", days), &s, |b, s| {
            b.iter(|| black_box(aggregate_periods(black_box(s), None, 5, 6)))
        });
    }

    group.finish();
}

fn bench_run_pipeline(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("pipeline/run_pipeline");

    for count in [10u64, 200] {
        let inputs = countries(count);
        group.bench_with_input(BenchmarkId::new("countries", count), &inputs, |b, inputs| {
            b.iter(|| black_box(run_pipeline(black_box(inputs), &config, None, None)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate_periods, bench_run_pipeline);
criterion_main!(benches);
