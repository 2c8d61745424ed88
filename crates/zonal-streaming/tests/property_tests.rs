//! Property-based tests: streaming results agree with batch computation

use proptest::prelude::*;
use zonal_core::Statistic;
use zonal_streaming::StreamingSampleStats;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

fn batch_mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn batch_variance(xs: &[f64]) -> f64 {
    let mean = batch_mean(xs);
    xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (xs.len() - 1) as f64
}

fn batch_median(xs: &[f64]) -> f64 {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

proptest! {
    // Property: streaming moments and extrema match the two-pass batch values
    #[test]
    fn prop_streaming_matches_batch(xs in prop::collection::vec(-1e3f64..1e3, 2..200)) {
        let mut stats = StreamingSampleStats::new();
        stats.set_statistics(&[
            Statistic::Mean,
            Statistic::Variance,
            Statistic::Min,
            Statistic::Max,
            Statistic::Sum,
            Statistic::Median,
        ]).unwrap();
        stats.offer_all(xs.iter().copied());

        let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(close(stats.statistic(Statistic::Mean).unwrap(), batch_mean(&xs)));
        prop_assert!(close(stats.statistic(Statistic::Variance).unwrap(), batch_variance(&xs)));
        prop_assert_eq!(stats.statistic(Statistic::Min).unwrap(), min);
        prop_assert_eq!(stats.statistic(Statistic::Max).unwrap(), max);
        prop_assert!(close(stats.statistic(Statistic::Sum).unwrap(), xs.iter().sum::<f64>()));
        prop_assert_eq!(stats.statistic(Statistic::Median).unwrap(), batch_median(&xs));
        prop_assert_eq!(stats.num_accepted(Statistic::Sum).unwrap(), xs.len() as u64);
    }

    // Property: every offer is counted exactly once, whatever the sample
    #[test]
    fn prop_counters_add_up(xs in prop::collection::vec(prop::option::of(prop_oneof![
        -10.0f64..10.0,
        Just(f64::NAN),
    ]), 0..100)) {
        let mut stats = StreamingSampleStats::new();
        stats.set_statistic(Statistic::Mean).unwrap();
        stats.add_nodata_value(0.0);
        for x in &xs {
            stats.offer(*x);
        }

        let counts = stats.counts(Statistic::Mean).unwrap();
        let missing = xs.iter().filter(|x| x.is_none()).count() as u64;
        let nan = xs.iter().filter(|x| matches!(x, Some(v) if v.is_nan())).count() as u64;
        prop_assert_eq!(counts.offered, xs.len() as u64);
        prop_assert_eq!(counts.nan, nan);
        prop_assert!(counts.nodata >= counts.nan);
        prop_assert_eq!(counts.accepted + (counts.nodata) + missing, counts.offered);
    }
}
