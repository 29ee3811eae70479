//! Criterion benchmarks for the per-ticker hot path.
//!
//! Benchmarks:
//! 1. Individual indicators over a year of daily bars
//! 2. Full snapshot + signal evaluation + scoring for one ticker

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use swingscan_core::domain::{PriceBar, PriceSeries};
use swingscan_core::indicators::{
    momentum_oscillator, simple_moving_average, volatility_range, IndicatorSnapshot,
};
use swingscan_core::scoring::{score, AltSignals, SignalParams, SignalSet};

fn make_series(n: usize) -> PriceSeries {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let bars = (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000 + (i as u64 % 7) * 50_000,
            }
        })
        .collect();
    PriceSeries::new("BENCH", bars).expect("valid bench series")
}

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");
    for n in [125usize, 250, 1000] {
        let series = make_series(n);
        group.bench_with_input(BenchmarkId::new("momentum_14", n), &series, |b, s| {
            b.iter(|| momentum_oscillator(black_box(s), 14))
        });
        group.bench_with_input(BenchmarkId::new("volatility_14", n), &series, |b, s| {
            b.iter(|| volatility_range(black_box(s), 14))
        });
        group.bench_with_input(BenchmarkId::new("sma_200", n), &series, |b, s| {
            b.iter(|| simple_moving_average(black_box(s), 200))
        });
    }
    group.finish();
}

fn bench_ticker_evaluation(c: &mut Criterion) {
    let series = make_series(250);
    let params = SignalParams::default();
    c.bench_function("snapshot_and_score_250", |b| {
        b.iter(|| {
            let snap = IndicatorSnapshot::compute(black_box(&series), &params);
            let signals = SignalSet::evaluate(&snap, &params, AltSignals::default());
            score(&signals)
        })
    });
}

criterion_group!(benches, bench_indicators, bench_ticker_evaluation);
criterion_main!(benches);
