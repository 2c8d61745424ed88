//! Property-based tests for range relations and set algebra
//!
//! Bounds are drawn from a small integer grid so touching and coinciding
//! endpoints come up often; membership is probed on a half-step grid.

use proptest::prelude::*;
use zonal_range::{algebra, Range, RangeComparator};

fn arb_range() -> impl Strategy<Value = Range<f64>> {
    prop_oneof![
        (-5i32..=5).prop_map(|v| Range::point(f64::from(v))),
        (
            prop::option::of(-5i32..=5),
            any::<bool>(),
            prop::option::of(-5i32..=5),
            any::<bool>()
        )
            .prop_filter_map("inverted or empty bounds", |(lo, lo_inc, hi, hi_inc)| {
                Range::new(lo.map(f64::from), lo_inc, hi.map(f64::from), hi_inc).ok()
            }),
    ]
}

fn probes() -> Vec<f64> {
    (-14..=14).map(|v| f64::from(v) / 2.0).collect()
}

fn covered(ranges: &[Range<f64>], v: f64) -> bool {
    ranges.iter().any(|r| r.contains(v))
}

proptest! {
    // Property: containment agrees with intersecting the point range
    #[test]
    fn prop_contains_matches_point_intersection(r in arb_range()) {
        for v in probes() {
            prop_assert_eq!(r.contains(v), r.intersects(&Range::point(v)), "{} / {}", r, v);
        }
    }

    // Property: NaN is never inside an interval or a finite point
    #[test]
    fn prop_nan_never_contained(r in arb_range()) {
        prop_assert!(!r.contains(f64::NAN));
    }

    // Property: swapping the operands inverts the relation
    #[test]
    fn prop_relation_inverse(a in arb_range(), b in arb_range()) {
        prop_assert_eq!(
            RangeComparator::compare(&b, &a),
            RangeComparator::compare(&a, &b).inverse()
        );
    }

    // Property: intersection holds exactly the values in both ranges
    #[test]
    fn prop_intersection_membership(a in arb_range(), b in arb_range()) {
        let common = algebra::intersection(&a, &b);
        prop_assert_eq!(common.is_some(), a.intersects(&b));
        for v in probes() {
            let inside = common.as_ref().map_or(false, |c| c.contains(v));
            prop_assert_eq!(inside, a.contains(v) && b.contains(v), "{} & {} at {}", a, b, v);
        }
    }

    // Property: b - a holds exactly the values of b not in a
    #[test]
    fn prop_subtract_membership(a in arb_range(), b in arb_range()) {
        let rest = algebra::subtract(&a, &b);
        prop_assert!(rest.len() <= 2);
        for v in probes() {
            prop_assert_eq!(covered(&rest, v), b.contains(v) && !a.contains(v), "{} - {} at {}", b, a, v);
        }
    }

    // Property: a range and its complement partition the line
    #[test]
    fn prop_complement_partitions_line(r in arb_range()) {
        let complement = algebra::complement(&r);
        for v in probes() {
            prop_assert_ne!(r.contains(v), covered(&complement, v));
        }

        let mut pieces = complement.clone();
        pieces.push(r.clone());
        prop_assert_eq!(algebra::simplify(&pieces), vec![Range::all()]);
    }

    // Property: simplify keeps membership, is idempotent and leaves no touching neighbours
    #[test]
    fn prop_simplify(ranges in prop::collection::vec(arb_range(), 0..6)) {
        let simple = algebra::simplify(&ranges);
        for v in probes() {
            prop_assert_eq!(covered(&ranges, v), covered(&simple, v));
        }
        prop_assert_eq!(algebra::simplify(&simple), simple.clone());

        for pair in simple.windows(2) {
            prop_assert!(!pair[0].intersects(&pair[1]));
            prop_assert!(algebra::union(&pair[0], &pair[1]).len() == 2);
        }
    }

    // Property: complement of a collection covers exactly the uncovered values
    #[test]
    fn prop_complement_all(ranges in prop::collection::vec(arb_range(), 0..5)) {
        let complement = algebra::complement_all(&ranges);
        for v in probes() {
            prop_assert_ne!(covered(&ranges, v), covered(&complement, v));
        }
    }
}
