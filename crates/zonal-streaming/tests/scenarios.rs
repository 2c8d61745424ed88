//! End-to-end scenarios for the streaming statistics

use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zonal_core::{RangesType, Statistic};
use zonal_range::Range;
use zonal_streaming::{ProcessorFactory, StreamingSampleStats};

const ONE_TO_FIVE: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

#[test]
fn unfiltered_summary_of_one_to_five() {
    let mut stats = StreamingSampleStats::new();
    stats
        .set_statistics(&[
            Statistic::Mean,
            Statistic::Sdev,
            Statistic::Min,
            Statistic::Max,
            Statistic::Sum,
        ])
        .unwrap();
    stats.offer_all(ONE_TO_FIVE);

    assert_relative_eq!(stats.statistic(Statistic::Mean).unwrap(), 3.0);
    assert_relative_eq!(stats.statistic(Statistic::Sum).unwrap(), 15.0);
    assert_relative_eq!(stats.statistic(Statistic::Min).unwrap(), 1.0);
    assert_relative_eq!(stats.statistic(Statistic::Max).unwrap(), 5.0);
    assert_relative_eq!(
        stats.statistic(Statistic::Sdev).unwrap(),
        1.5811388300841898,
        epsilon = 1e-12
    );
    for stat in [Statistic::Mean, Statistic::Sdev, Statistic::Min, Statistic::Sum] {
        assert_eq!(stats.num_accepted(stat).unwrap(), 5);
        assert_eq!(stats.num_offered(stat).unwrap(), 5);
    }
}

#[test]
fn excluded_point_is_skipped() {
    let mut stats = StreamingSampleStats::new();
    stats.set_statistic(Statistic::Sum).unwrap();
    stats.add_range(&Range::closed(2.0, 2.0).unwrap(), RangesType::Exclude).unwrap();
    stats.offer_all(ONE_TO_FIVE);

    assert_eq!(stats.num_offered(Statistic::Sum).unwrap(), 5);
    assert_eq!(stats.num_accepted(Statistic::Sum).unwrap(), 4);
    assert_relative_eq!(stats.statistic(Statistic::Sum).unwrap(), 13.0);
}

#[test]
fn nan_counts_as_nodata() {
    let mut stats = StreamingSampleStats::new();
    stats.set_statistic(Statistic::Sum).unwrap();
    stats.offer_all([1.0, f64::NAN, 3.0]);

    let counts = stats.counts(Statistic::Sum).unwrap();
    assert_eq!(counts.offered, 3);
    assert_eq!(counts.accepted, 2);
    assert_eq!(counts.nan, 1);
    assert_eq!(counts.nodata, 1);
    assert_relative_eq!(stats.statistic(Statistic::Sum).unwrap(), 4.0);
}

#[test]
fn include_ranges_restrict_every_statistic() {
    let mut stats = StreamingSampleStats::new();
    stats
        .set_statistics(&[Statistic::Mean, Statistic::Median, Statistic::Range])
        .unwrap();
    stats.add_range(&Range::closed(0.0, 2.0).unwrap(), RangesType::Include).unwrap();
    stats.add_range(&Range::at_least(5.0).unwrap(), RangesType::Include).unwrap();
    stats.offer_all([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    assert_relative_eq!(stats.statistic(Statistic::Mean).unwrap(), 3.5);
    assert_relative_eq!(stats.statistic(Statistic::Median).unwrap(), 3.5);
    assert_relative_eq!(stats.statistic(Statistic::Range).unwrap(), 5.0);
}

#[test]
fn order_of_configuration_does_not_matter() {
    let samples = [1.0, -9999.0, 7.0, 2.0, f64::NAN, 12.0];

    let mut early = StreamingSampleStats::new();
    early.set_statistic(Statistic::Mean).unwrap();
    early.add_range(&Range::greater_than(10.0).unwrap(), RangesType::Exclude).unwrap();
    early.add_nodata_value(-9999.0);
    early.offer_all(samples);

    let mut late = StreamingSampleStats::new();
    late.add_nodata_value(-9999.0);
    late.add_range(&Range::greater_than(10.0).unwrap(), RangesType::Exclude).unwrap();
    late.set_statistic(Statistic::Mean).unwrap();
    late.offer_all(samples);

    assert_eq!(
        early.statistic(Statistic::Mean).unwrap(),
        late.statistic(Statistic::Mean).unwrap()
    );
    assert_eq!(early.counts(Statistic::Mean).unwrap(), late.counts(Statistic::Mean).unwrap());
    assert_relative_eq!(late.statistic(Statistic::Mean).unwrap(), 10.0 / 3.0);
}

#[test]
fn approximate_median_tracks_exact_median() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut stats = StreamingSampleStats::new();
    stats
        .set_statistics(&[Statistic::Median, Statistic::ApproxMedian])
        .unwrap();
    for _ in 0..50_000 {
        stats.offer(Some(rng.gen::<f64>()));
    }

    let exact = stats.statistic(Statistic::Median).unwrap();
    let approx = stats.statistic(Statistic::ApproxMedian).unwrap();
    assert!(
        ((approx - exact) / exact).abs() < 0.05,
        "remedian {approx} vs exact {exact}"
    );
}

#[test]
fn exact_median_capacity_degrades_gracefully() {
    let factory = ProcessorFactory::new().with_median_capacity(4);
    let mut stats = StreamingSampleStats::with_factory(factory);
    stats.set_statistic(Statistic::Median).unwrap();
    stats.offer_all([4.0, 3.0, 2.0, 1.0, 100.0, 200.0, 300.0]);

    // counters still see every sample; the median uses the stored four
    assert_eq!(stats.num_accepted(Statistic::Median).unwrap(), 7);
    assert_relative_eq!(stats.statistic(Statistic::Median).unwrap(), 2.5);
}
