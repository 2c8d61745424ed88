//! Throughput of the streaming processors
//!
//! Each benchmark pushes a seeded uniform stream through one statistic (or
//! the full set) with a NoData value and an exclude range configured, which is
//! the common case for raster data.
//!
//!   cargo bench --bench streaming_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zonal_core::{RangesType, Statistic};
use zonal_range::Range;
use zonal_streaming::StreamingSampleStats;

fn samples(n: usize) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    (0..n).map(|_| rng.gen_range(-100.0..100.0)).collect()
}

fn configured(stats: &[Statistic]) -> StreamingSampleStats {
    let mut s = StreamingSampleStats::new();
    s.set_statistics(stats).unwrap();
    s.add_nodata_value(-9999.0);
    s.add_range(&Range::greater_than(90.0).unwrap(), RangesType::Exclude)
        .unwrap();
    s
}

fn bench_single_statistic(c: &mut Criterion) {
    let data = samples(100_000);
    let mut group = c.benchmark_group("single_statistic");
    group.throughput(Throughput::Elements(data.len() as u64));

    for stat in [
        Statistic::Mean,
        Statistic::Min,
        Statistic::Sum,
        Statistic::Median,
        Statistic::ApproxMedian,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(stat), &data, |b, data| {
            b.iter(|| {
                let mut s = configured(&[stat]);
                s.offer_all(data.iter().copied());
                black_box(s.statistic(stat).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_all_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_statistics");
    for n in [1_000usize, 10_000, 100_000] {
        let data = samples(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("n", n), &data, |b, data| {
            b.iter(|| {
                let mut s = configured(&Statistic::ALL);
                s.offer_all(data.iter().copied());
                black_box(s.statistic(Statistic::Variance).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_statistic, bench_all_statistics);
criterion_main!(benches);
