//! Extended comparison of ranges
//!
//! Every endpoint is mapped onto an extended line:
//!
//! ```text
//! {-inf}  <  (-inf  <  finite values  <  +inf)  <  {+inf}  <  {NaN}
//! ```
//!
//! where `(-inf` and `+inf)` are the unbounded ends of intervals and `{..}` are
//! the special points. At a finite value an excluded lower bound sits just above
//! the value and an excluded upper bound just below it, so `[2` < `(2` and
//! `2)` < `2]`. Comparing two ranges is then four comparisons on this line.

use crate::range::{Endpoint, PointKind, Range, Shape};
use crate::relation::{RangeRelation, MAX_MAX, MIN_MIN};
use std::cmp::Ordering;
use zonal_core::RangeValue;

/// Position of an endpoint on the extended line
#[derive(Debug, Clone, Copy)]
struct Position<T> {
    tier: u8,
    value: Option<T>,
    shift: i8,
}

const NEG_INF_POINT: u8 = 0;
const UNBOUNDED_BELOW: u8 = 1;
const FINITE: u8 = 2;
const UNBOUNDED_ABOVE: u8 = 3;
const POS_INF_POINT: u8 = 4;
const NAN_POINT: u8 = 5;

impl<T: RangeValue> Position<T> {
    fn tier(tier: u8) -> Self {
        Self {
            tier,
            value: None,
            shift: 0,
        }
    }

    fn finite(value: T, shift: i8) -> Self {
        Self {
            tier: FINITE,
            value: Some(value),
            shift,
        }
    }

    fn cmp(&self, other: &Self) -> Ordering {
        self.tier
            .cmp(&other.tier)
            .then_with(|| match (self.value, other.value) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            })
            .then(self.shift.cmp(&other.shift))
    }
}

fn point_position<T: RangeValue>(kind: PointKind<T>) -> Position<T> {
    match kind {
        PointKind::Finite(v) => Position::finite(v, 0),
        PointKind::NegInfinity => Position::tier(NEG_INF_POINT),
        PointKind::PosInfinity => Position::tier(POS_INF_POINT),
        PointKind::NaN => Position::tier(NAN_POINT),
    }
}

fn lower_position<T: RangeValue>(range: &Range<T>) -> Position<T> {
    match *range.shape() {
        Shape::Point(kind) => point_position(kind),
        Shape::Interval { min, .. } => match min {
            Endpoint::Unbounded => Position::tier(UNBOUNDED_BELOW),
            Endpoint::Finite { value, included } => Position::finite(value, if included { 0 } else { 1 }),
        },
    }
}

fn upper_position<T: RangeValue>(range: &Range<T>) -> Position<T> {
    match *range.shape() {
        Shape::Point(kind) => point_position(kind),
        Shape::Interval { max, .. } => match max {
            Endpoint::Unbounded => Position::tier(UNBOUNDED_ABOVE),
            Endpoint::Finite { value, included } => Position::finite(value, if included { 0 } else { -1 }),
        },
    }
}

/// Compares ranges and classifies their relation
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeComparator;

impl RangeComparator {
    /// The four comparison flags of `r1` against `r2`
    ///
    /// Order: min1 vs max2, min1 vs min2, max1 vs max2, max1 vs min2.
    pub fn flags<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> [Ordering; 4] {
        let (min1, max1) = (lower_position(r1), upper_position(r1));
        let (min2, max2) = (lower_position(r2), upper_position(r2));
        [
            min1.cmp(&max2),
            min1.cmp(&min2),
            max1.cmp(&max2),
            max1.cmp(&min2),
        ]
    }

    /// Classify how `r1` sits relative to `r2`
    pub fn compare<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> RangeRelation {
        let flags = Self::flags(r1, r2);
        RangeRelation::from_flags(flags).unwrap_or_else(|| {
            unreachable!("ranges {r1} and {r2} produced impossible flags {flags:?}")
        })
    }

    /// Order by lower end, then by upper end
    ///
    /// This is the ordering used to sort range collections.
    pub fn compare_min_max<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> Ordering {
        let flags = Self::flags(r1, r2);
        flags[MIN_MIN].then(flags[MAX_MAX])
    }

    /// Order two lower endpoints
    pub(crate) fn compare_lower<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> Ordering {
        lower_position(r1).cmp(&lower_position(r2))
    }

    /// Order two upper endpoints
    pub(crate) fn compare_upper<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> Ordering {
        upper_position(r1).cmp(&upper_position(r2))
    }
}

/// Shorthand for [`RangeComparator::compare`]
pub fn compare<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> RangeRelation {
    RangeComparator::compare(r1, r2)
}
