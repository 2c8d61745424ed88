//! Immutable generic interval type

use crate::comparator::RangeComparator;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use zonal_core::{Error, RangeValue, Result};

/// Direction of an infinite point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Negative infinity
    Negative,
    /// Positive infinity
    Positive,
}

/// One end of an interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint<T> {
    /// No bound on this side (towards -inf for a lower end, +inf for an upper end)
    Unbounded,
    /// A finite bound, which may or may not belong to the interval
    Finite { value: T, included: bool },
}

impl<T: RangeValue> Endpoint<T> {
    /// The finite value, if any
    pub fn value(&self) -> Option<T> {
        match self {
            Self::Unbounded => None,
            Self::Finite { value, .. } => Some(*value),
        }
    }

    /// Whether the bound value belongs to the interval
    pub fn is_included(&self) -> bool {
        matches!(self, Self::Finite { included: true, .. })
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Same bound value with the inclusion flag flipped
    pub(crate) fn flipped(&self) -> Self {
        match *self {
            Self::Unbounded => Self::Unbounded,
            Self::Finite { value, included } => Self::Finite {
                value,
                included: !included,
            },
        }
    }
}

/// Location of a degenerate (single value) range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointKind<T> {
    /// An ordinary value
    Finite(T),
    /// The point at negative infinity (contains nothing)
    NegInfinity,
    /// The point at positive infinity (contains nothing)
    PosInfinity,
    /// The point that matches only NaN probes
    NaN,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Shape<T> {
    Point(PointKind<T>),
    Interval { min: Endpoint<T>, max: Endpoint<T> },
}

/// An immutable set of values bounded by two endpoints, or a single point
///
/// Intervals may be open or closed at each finite end and unbounded at either
/// side. Points may be finite, at either infinity, or at NaN. NaN never bounds
/// an interval: at the lower end it becomes -inf, at the upper end +inf.
///
/// Equality is structural: two ranges are equal when they have the same shape,
/// the same endpoint kinds, the same finite values and the same inclusion
/// flags.
///
/// # Example
///
/// ```rust
/// use zonal_range::Range;
///
/// let r = Range::closed_open(1.0, 2.0).unwrap();
/// assert!(r.contains(1.0));
/// assert!(!r.contains(2.0));
/// assert_eq!(r.to_string(), "[1, 2)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Range<T> {
    shape: Shape<T>,
}

impl<T: RangeValue> Range<T> {
    /// Create a range from optional bounds
    ///
    /// `None`, NaN and an outward infinity all mean "unbounded" on that side.
    /// Equal finite bounds form a point when both are included and are rejected
    /// otherwise. A lower bound of +inf (or an upper bound of -inf) is only
    /// valid when the other bound is the same infinity, giving an infinite
    /// point.
    pub fn new(min: Option<T>, min_included: bool, max: Option<T>, max_included: bool) -> Result<Self> {
        if let Some(lo) = min.filter(|v| v.is_pos_infinite()) {
            return match max {
                Some(hi) if hi.is_pos_infinite() => Ok(Self::point_at_infinity(Direction::Positive)),
                _ => Err(Error::invalid_range(format!(
                    "min is {lo} but max is not +inf"
                ))),
            };
        }
        if let Some(hi) = max.filter(|v| v.is_neg_infinite()) {
            return match min {
                Some(lo) if lo.is_neg_infinite() => Ok(Self::point_at_infinity(Direction::Negative)),
                _ => Err(Error::invalid_range(format!(
                    "max is {hi} but min is not -inf"
                ))),
            };
        }

        let lower = match min {
            Some(v) if v.is_finite_value() => Endpoint::Finite { value: v, included: min_included },
            _ => Endpoint::Unbounded,
        };
        let upper = match max {
            Some(v) if v.is_finite_value() => Endpoint::Finite { value: v, included: max_included },
            _ => Endpoint::Unbounded,
        };
        Self::from_endpoints(lower, upper)
    }

    /// Create an interval from two endpoints
    pub fn from_endpoints(min: Endpoint<T>, max: Endpoint<T>) -> Result<Self> {
        if let (
            Endpoint::Finite { value: lo, included: lo_inc },
            Endpoint::Finite { value: hi, included: hi_inc },
        ) = (min, max)
        {
            if lo > hi {
                return Err(Error::inverted_bounds(lo, hi));
            }
            if lo == hi {
                if lo_inc && hi_inc {
                    return Ok(Self::point(lo));
                }
                return Err(Error::invalid_range(format!(
                    "equal bounds ({lo}) must both be included to form a point"
                )));
            }
        }
        Ok(Self {
            shape: Shape::Interval { min, max },
        })
    }

    /// Create a point range
    ///
    /// NaN gives the NaN point, infinities give the corresponding infinite point.
    pub fn point(value: T) -> Self {
        let kind = if value.is_nan_value() {
            PointKind::NaN
        } else if value.is_pos_infinite() {
            PointKind::PosInfinity
        } else if value.is_neg_infinite() {
            PointKind::NegInfinity
        } else {
            PointKind::Finite(value)
        };
        Self {
            shape: Shape::Point(kind),
        }
    }

    /// Create a point at positive or negative infinity
    pub fn point_at_infinity(direction: Direction) -> Self {
        let kind = match direction {
            Direction::Negative => PointKind::NegInfinity,
            Direction::Positive => PointKind::PosInfinity,
        };
        Self {
            shape: Shape::Point(kind),
        }
    }

    /// Create the point that matches only NaN
    pub fn nan_point() -> Self {
        Self {
            shape: Shape::Point(PointKind::NaN),
        }
    }

    /// Create a point from an optional value
    ///
    /// A missing value needs an infinity direction.
    pub fn create_point(value: Option<T>, direction: Option<Direction>) -> Result<Self> {
        match (value, direction) {
            (Some(v), _) => Ok(Self::point(v)),
            (None, Some(dir)) => Ok(Self::point_at_infinity(dir)),
            (None, None) => Err(Error::invalid_range(
                "a point without a value needs an infinity direction",
            )),
        }
    }

    /// The whole line, (-inf, +inf)
    pub fn all() -> Self {
        Self {
            shape: Shape::Interval {
                min: Endpoint::Unbounded,
                max: Endpoint::Unbounded,
            },
        }
    }

    /// `[min, max]`
    pub fn closed(min: T, max: T) -> Result<Self> {
        Self::new(Some(min), true, Some(max), true)
    }

    /// `(min, max)`
    pub fn open(min: T, max: T) -> Result<Self> {
        Self::new(Some(min), false, Some(max), false)
    }

    /// `[min, max)`
    pub fn closed_open(min: T, max: T) -> Result<Self> {
        Self::new(Some(min), true, Some(max), false)
    }

    /// `(min, max]`
    pub fn open_closed(min: T, max: T) -> Result<Self> {
        Self::new(Some(min), false, Some(max), true)
    }

    /// `[min, +inf)`
    pub fn at_least(min: T) -> Result<Self> {
        Self::new(Some(min), true, None, false)
    }

    /// `(min, +inf)`
    pub fn greater_than(min: T) -> Result<Self> {
        Self::new(Some(min), false, None, false)
    }

    /// `(-inf, max]`
    pub fn at_most(max: T) -> Result<Self> {
        Self::new(None, false, Some(max), true)
    }

    /// `(-inf, max)`
    pub fn less_than(max: T) -> Result<Self> {
        Self::new(None, false, Some(max), false)
    }

    pub(crate) fn shape(&self) -> &Shape<T> {
        &self.shape
    }

    /// Whether this range is a single point (finite, infinite or NaN)
    pub fn is_point(&self) -> bool {
        matches!(self.shape, Shape::Point(_))
    }

    pub fn is_finite_point(&self) -> bool {
        matches!(self.shape, Shape::Point(PointKind::Finite(_)))
    }

    pub fn is_infinite_point(&self) -> bool {
        matches!(
            self.shape,
            Shape::Point(PointKind::NegInfinity) | Shape::Point(PointKind::PosInfinity)
        )
    }

    pub fn is_nan_point(&self) -> bool {
        matches!(self.shape, Shape::Point(PointKind::NaN))
    }

    /// The point's location, if this range is a point
    pub fn point_kind(&self) -> Option<PointKind<T>> {
        match self.shape {
            Shape::Point(kind) => Some(kind),
            Shape::Interval { .. } => None,
        }
    }

    /// Lower endpoint, viewing a finite point as `[v, v]`
    ///
    /// `None` for infinite and NaN points.
    pub fn lower(&self) -> Option<Endpoint<T>> {
        match self.shape {
            Shape::Point(PointKind::Finite(v)) => Some(Endpoint::Finite { value: v, included: true }),
            Shape::Point(_) => None,
            Shape::Interval { min, .. } => Some(min),
        }
    }

    /// Upper endpoint, viewing a finite point as `[v, v]`
    ///
    /// `None` for infinite and NaN points.
    pub fn upper(&self) -> Option<Endpoint<T>> {
        match self.shape {
            Shape::Point(PointKind::Finite(v)) => Some(Endpoint::Finite { value: v, included: true }),
            Shape::Point(_) => None,
            Shape::Interval { max, .. } => Some(max),
        }
    }

    /// Finite lower bound value (the value itself for a finite point)
    pub fn min(&self) -> Option<T> {
        self.lower().and_then(|e| e.value())
    }

    /// Finite upper bound value (the value itself for a finite point)
    pub fn max(&self) -> Option<T> {
        self.upper().and_then(|e| e.value())
    }

    /// Whether the lower bound value belongs to the range
    ///
    /// True for finite and NaN points, false for infinite points and
    /// unbounded lower ends.
    pub fn is_min_included(&self) -> bool {
        match self.shape {
            Shape::Point(PointKind::Finite(_)) | Shape::Point(PointKind::NaN) => true,
            Shape::Point(_) => false,
            Shape::Interval { min, .. } => min.is_included(),
        }
    }

    /// Whether the upper bound value belongs to the range
    pub fn is_max_included(&self) -> bool {
        match self.shape {
            Shape::Point(PointKind::Finite(_)) | Shape::Point(PointKind::NaN) => true,
            Shape::Point(_) => false,
            Shape::Interval { max, .. } => max.is_included(),
        }
    }

    /// Whether the interval is unbounded below
    pub fn is_min_open(&self) -> bool {
        matches!(self.shape, Shape::Interval { min: Endpoint::Unbounded, .. })
    }

    /// Whether the interval is unbounded above
    pub fn is_max_open(&self) -> bool {
        matches!(self.shape, Shape::Interval { max: Endpoint::Unbounded, .. })
    }

    /// Whether the range reaches -inf (unbounded below, or the point at -inf)
    pub fn is_min_neg_inf(&self) -> bool {
        self.is_min_open() || matches!(self.shape, Shape::Point(PointKind::NegInfinity))
    }

    /// Whether the range reaches +inf (unbounded above, or the point at +inf)
    pub fn is_max_inf(&self) -> bool {
        self.is_max_open() || matches!(self.shape, Shape::Point(PointKind::PosInfinity))
    }

    /// Whether both ends are finite (a finite point or a bounded interval)
    pub fn is_bounded(&self) -> bool {
        self.min().is_some() && self.max().is_some()
    }

    /// Test whether a value lies in this range
    ///
    /// A finite point matches only an equal value, the NaN point only NaN, and
    /// infinite points nothing. Intervals never contain NaN; unbounded sides
    /// accept every non-NaN value.
    pub fn contains(&self, value: T) -> bool {
        match self.shape {
            Shape::Point(PointKind::Finite(p)) => !value.is_nan_value() && value == p,
            Shape::Point(PointKind::NaN) => value.is_nan_value(),
            Shape::Point(_) => false,
            Shape::Interval { min, max } => {
                if value.is_nan_value() {
                    return false;
                }
                let above_min = match min {
                    Endpoint::Unbounded => true,
                    Endpoint::Finite { value: lo, included: true } => value >= lo,
                    Endpoint::Finite { value: lo, included: false } => value > lo,
                };
                let below_max = match max {
                    Endpoint::Unbounded => true,
                    Endpoint::Finite { value: hi, included: true } => value <= hi,
                    Endpoint::Finite { value: hi, included: false } => value < hi,
                };
                above_min && below_max
            }
        }
    }

    /// Membership test for a possibly missing value
    ///
    /// Fails with [`Error::UnsupportedOperation`] when the value is missing.
    pub fn try_contains(&self, value: Option<T>) -> Result<bool> {
        value
            .map(|v| self.contains(v))
            .ok_or_else(|| Error::missing_value("contains"))
    }

    /// Whether the two ranges share at least one position on the line
    pub fn intersects(&self, other: &Range<T>) -> bool {
        RangeComparator::compare(self, other).is_intersection()
    }
}

impl<T: RangeValue> Eq for Range<T> {}

impl<T: RangeValue> Hash for Range<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fn hash_endpoint<T: RangeValue, H: Hasher>(endpoint: &Endpoint<T>, state: &mut H) {
            match endpoint {
                Endpoint::Unbounded => 0u8.hash(state),
                Endpoint::Finite { value, included } => {
                    1u8.hash(state);
                    value.hash_bits().hash(state);
                    included.hash(state);
                }
            }
        }

        match &self.shape {
            Shape::Point(kind) => {
                0u8.hash(state);
                match kind {
                    PointKind::Finite(v) => {
                        0u8.hash(state);
                        v.hash_bits().hash(state);
                    }
                    PointKind::NegInfinity => 1u8.hash(state),
                    PointKind::PosInfinity => 2u8.hash(state),
                    PointKind::NaN => 3u8.hash(state),
                }
            }
            Shape::Interval { min, max } => {
                1u8.hash(state);
                hash_endpoint(min, state);
                hash_endpoint(max, state);
            }
        }
    }
}

impl<T: RangeValue> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            Shape::Point(PointKind::Finite(v)) => write!(f, "{{{v}}}"),
            Shape::Point(PointKind::NegInfinity) => write!(f, "{{-inf}}"),
            Shape::Point(PointKind::PosInfinity) => write!(f, "{{+inf}}"),
            Shape::Point(PointKind::NaN) => write!(f, "{{NaN}}"),
            Shape::Interval { min, max } => {
                match min {
                    Endpoint::Unbounded => write!(f, "(-inf")?,
                    Endpoint::Finite { value, included } => {
                        write!(f, "{}{value}", if included { '[' } else { '(' })?
                    }
                }
                match max {
                    Endpoint::Unbounded => write!(f, ", +inf)"),
                    Endpoint::Finite { value, included } => {
                        write!(f, ", {value}{}", if included { ']' } else { ')' })
                    }
                }
            }
        }
    }
}

fn included() -> bool {
    true
}

/// Serialisable description of a range
///
/// Used by configuration files; converting back into a [`Range`] goes through
/// the validating constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeSpec<T> {
    /// `{"point": 3.0}`
    Point { point: T },
    /// `{"infinity": "positive"}`
    Infinite { infinity: Direction },
    /// `{"nan": true}`
    NotANumber { nan: bool },
    /// `{"min": 0.0, "max": 1.0, "max_included": false}`; missing bounds are unbounded
    Interval {
        min: Option<T>,
        #[serde(default = "included")]
        min_included: bool,
        max: Option<T>,
        #[serde(default = "included")]
        max_included: bool,
    },
}

impl<T: RangeValue> TryFrom<RangeSpec<T>> for Range<T> {
    type Error = Error;

    fn try_from(spec: RangeSpec<T>) -> Result<Self> {
        match spec {
            RangeSpec::Point { point } => Ok(Range::point(point)),
            RangeSpec::Infinite { infinity } => Ok(Range::point_at_infinity(infinity)),
            RangeSpec::NotANumber { nan: true } => Ok(Range::nan_point()),
            RangeSpec::NotANumber { nan: false } => {
                Err(Error::invalid_range("\"nan\" must be true when present"))
            }
            RangeSpec::Interval {
                min,
                min_included,
                max,
                max_included,
            } => Range::new(min, min_included, max, max_included),
        }
    }
}

impl<T: RangeValue> From<&Range<T>> for RangeSpec<T> {
    fn from(range: &Range<T>) -> Self {
        match range.shape {
            Shape::Point(PointKind::Finite(v)) => RangeSpec::Point { point: v },
            Shape::Point(PointKind::NegInfinity) => RangeSpec::Infinite {
                infinity: Direction::Negative,
            },
            Shape::Point(PointKind::PosInfinity) => RangeSpec::Infinite {
                infinity: Direction::Positive,
            },
            Shape::Point(PointKind::NaN) => RangeSpec::NotANumber { nan: true },
            Shape::Interval { min, max } => RangeSpec::Interval {
                min: min.value(),
                min_included: min.is_included(),
                max: max.value(),
                max_included: max.is_included(),
            },
        }
    }
}

impl<T: RangeValue + Serialize> Serialize for Range<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RangeSpec::from(self).serialize(serializer)
    }
}

impl<'de, T: RangeValue + Deserialize<'de>> Deserialize<'de> for Range<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let spec = RangeSpec::<T>::deserialize(deserializer)?;
        Range::try_from(spec).map_err(serde::de::Error::custom)
    }
}
