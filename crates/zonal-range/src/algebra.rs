//! Set operations over ranges
//!
//! All operations return new ranges; inputs are never modified. Collections
//! come back sorted by [`RangeComparator::compare_min_max`].

use crate::comparator::RangeComparator;
use crate::range::{Endpoint, Range};
use crate::relation::RangeRelation;
use std::cmp::Ordering;
use zonal_core::RangeValue;

/// Intersection of two ranges, or `None` when they are disjoint
pub fn intersection<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> Option<Range<T>> {
    let relation = RangeComparator::compare(r1, r2);
    if !relation.is_intersection() {
        return None;
    }
    // a point that intersects anything is the whole intersection
    if r1.is_point() {
        return Some(r1.clone());
    }
    if r2.is_point() {
        return Some(r2.clone());
    }

    let lower = match RangeComparator::compare_lower(r1, r2) {
        Ordering::Less => r2.lower(),
        _ => r1.lower(),
    }?;
    let upper = match RangeComparator::compare_upper(r1, r2) {
        Ordering::Greater => r2.upper(),
        _ => r1.upper(),
    }?;
    Range::from_endpoints(lower, upper).ok()
}

/// Intersection of every range in a collection
///
/// `None` if the collection is empty or any two members are disjoint.
pub fn intersection_of<T: RangeValue>(ranges: &[Range<T>]) -> Option<Range<T>> {
    let (first, rest) = ranges.split_first()?;
    rest.iter()
        .try_fold(first.clone(), |acc, r| intersection(&acc, r))
}

/// The part of `r2` not covered by `r1` (that is, `r2 - r1`)
///
/// Yields zero, one or two ranges.
pub fn subtract<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> Vec<Range<T>> {
    let Some(common) = intersection(r1, r2) else {
        return vec![r2.clone()];
    };
    if &common == r2 {
        return Vec::new();
    }

    // r2 is an interval here: a point r2 that intersects r1 is fully covered
    let mut fragments = Vec::with_capacity(2);
    if RangeComparator::compare_lower(r2, &common) == Ordering::Less {
        if let (Some(lo), Some(cut)) = (r2.lower(), common.lower()) {
            fragments.extend(Range::from_endpoints(lo, cut.flipped()).ok());
        }
    }
    if RangeComparator::compare_upper(&common, r2) == Ordering::Less {
        if let (Some(cut), Some(hi)) = (common.upper(), r2.upper()) {
            fragments.extend(Range::from_endpoints(cut.flipped(), hi).ok());
        }
    }
    fragments
}

/// Everything on the line outside `range`
pub fn complement<T: RangeValue>(range: &Range<T>) -> Vec<Range<T>> {
    subtract(range, &Range::all())
}

/// Everything on the line outside every range of a collection
///
/// The collection is simplified first; an empty collection yields the whole
/// line.
pub fn complement_all<T: RangeValue>(ranges: &[Range<T>]) -> Vec<Range<T>> {
    let mut remaining = vec![Range::all()];
    for r in simplify(ranges) {
        remaining = remaining
            .iter()
            .flat_map(|piece| subtract(&r, piece))
            .collect();
        if remaining.is_empty() {
            break;
        }
    }
    sort(&remaining)
}

/// Sorted copy of `ranges`, ordered by lower end and then upper end
///
/// The sort is stable.
pub fn sort<T: RangeValue>(ranges: &[Range<T>]) -> Vec<Range<T>> {
    let mut sorted = ranges.to_vec();
    sorted.sort_by(RangeComparator::compare_min_max);
    sorted
}

/// Merge two ranges that share at least one position
fn merge_overlapping<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> Option<Range<T>> {
    use RangeRelation::*;
    match RangeComparator::compare(r1, r2) {
        Before | After => None,
        Contains | FinishedByPoint | StartedByPoint | PointEquals | Equals | StartedBy
        | FinishedBy => Some(r1.clone()),
        During | PointStarts | PointFinishes | Starts | Finishes => Some(r2.clone()),
        Overlaps | Meets => Range::from_endpoints(r1.lower()?, r2.upper()?).ok(),
        OverlappedBy | MetBy => Range::from_endpoints(r2.lower()?, r1.upper()?).ok(),
    }
}

/// Join `r1` and a following `r2` that touch at a value exactly one of them includes
fn join_adjacent<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> Option<Range<T>> {
    match (r1.upper()?, r2.lower()?) {
        (
            Endpoint::Finite { value: a, included: a_inc },
            Endpoint::Finite { value: b, included: b_inc },
        ) if a == b && a_inc != b_inc => Range::from_endpoints(r1.lower()?, r2.upper()?).ok(),
        _ => None,
    }
}

/// Reduce a collection to the smallest sorted set of disjoint ranges covering
/// the same values
///
/// Intersecting ranges are merged until nothing changes; then neighbours such
/// as `[a, b)` and `[b, c]` are joined.
pub fn simplify<T: RangeValue>(ranges: &[Range<T>]) -> Vec<Range<T>> {
    let mut work = ranges.to_vec();

    'merge: loop {
        for i in 0..work.len() {
            for j in (i + 1)..work.len() {
                if let Some(merged) = merge_overlapping(&work[i], &work[j]) {
                    work.swap_remove(j);
                    work[i] = merged;
                    continue 'merge;
                }
            }
        }
        break;
    }

    let mut joined: Vec<Range<T>> = Vec::with_capacity(work.len());
    for r in sort(&work) {
        match joined.last().and_then(|prev| join_adjacent(prev, &r)) {
            Some(merged) => {
                joined.pop();
                joined.push(merged);
            }
            None => joined.push(r),
        }
    }
    joined
}

/// Union of two ranges as a simplified collection
pub fn union<T: RangeValue>(r1: &Range<T>, r2: &Range<T>) -> Vec<Range<T>> {
    simplify(&[r1.clone(), r2.clone()])
}
