//! The eighteen possible relations between two ranges
//!
//! A relation is identified by four comparison flags, each `Less`, `Equal` or
//! `Greater`, taken in this order:
//!
//! 1. r1 min vs r2 max
//! 2. r1 min vs r2 min
//! 3. r1 max vs r2 max
//! 4. r1 max vs r2 min
//!
//! Because every range has `min <= max`, only eighteen of the eighty-one flag
//! combinations can occur. Each relation also has a four letter code built from
//! the flags (`L`, `E`, `G`), e.g. `LLLG` for [`RangeRelation::Overlaps`].

use std::cmp::Ordering::{self, Equal, Greater, Less};
use std::fmt;

/// Index of the r1 min vs r2 max flag
pub const MIN_MAX: usize = 0;
/// Index of the r1 min vs r2 min flag
pub const MIN_MIN: usize = 1;
/// Index of the r1 max vs r2 max flag
pub const MAX_MAX: usize = 2;
/// Index of the r1 max vs r2 min flag
pub const MAX_MIN: usize = 3;

/// How a range `r1` sits relative to a range `r2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeRelation {
    /// `LLLL`: r1 lies entirely below r2
    Before,
    /// `LLLE`: r1's max touches r2's min
    Meets,
    /// `LLEE`: r2 is a point at r1's max
    FinishedByPoint,
    /// `LLLG`: r1 overlaps the lower part of r2
    Overlaps,
    /// `LLEG`: same max, r1 starts lower
    FinishedBy,
    /// `LLGG`: r1 strictly encloses r2
    Contains,
    /// `LELE`: r1 is a point at r2's min
    PointStarts,
    /// `LELG`: same min, r1 ends first
    Starts,
    /// `LEEG`: identical intervals
    Equals,
    /// `LEGG`: same min, r1 ends later
    StartedBy,
    /// `LGLG`: r1 lies strictly inside r2
    During,
    /// `LGEG`: same max, r1 starts later
    Finishes,
    /// `LGGG`: r1 overlaps the upper part of r2
    OverlappedBy,
    /// `EGEG`: r1 is a point at r2's max
    PointFinishes,
    /// `EGGG`: r1's min touches r2's max
    MetBy,
    /// `EEGG`: r2 is a point at r1's min
    StartedByPoint,
    /// `EEEE`: both are the same point
    PointEquals,
    /// `GGGG`: r1 lies entirely above r2
    After,
}

impl RangeRelation {
    /// All relations, ordered as in the comparison table
    pub const ALL: [RangeRelation; 18] = [
        Self::Before,
        Self::Meets,
        Self::FinishedByPoint,
        Self::Overlaps,
        Self::FinishedBy,
        Self::Contains,
        Self::PointStarts,
        Self::Starts,
        Self::Equals,
        Self::StartedBy,
        Self::During,
        Self::Finishes,
        Self::OverlappedBy,
        Self::PointFinishes,
        Self::MetBy,
        Self::StartedByPoint,
        Self::PointEquals,
        Self::After,
    ];

    /// The four comparison flags that identify this relation
    pub fn flags(&self) -> [Ordering; 4] {
        match self {
            Self::Before => [Less, Less, Less, Less],
            Self::Meets => [Less, Less, Less, Equal],
            Self::FinishedByPoint => [Less, Less, Equal, Equal],
            Self::Overlaps => [Less, Less, Less, Greater],
            Self::FinishedBy => [Less, Less, Equal, Greater],
            Self::Contains => [Less, Less, Greater, Greater],
            Self::PointStarts => [Less, Equal, Less, Equal],
            Self::Starts => [Less, Equal, Less, Greater],
            Self::Equals => [Less, Equal, Equal, Greater],
            Self::StartedBy => [Less, Equal, Greater, Greater],
            Self::During => [Less, Greater, Less, Greater],
            Self::Finishes => [Less, Greater, Equal, Greater],
            Self::OverlappedBy => [Less, Greater, Greater, Greater],
            Self::PointFinishes => [Equal, Greater, Equal, Greater],
            Self::MetBy => [Equal, Greater, Greater, Greater],
            Self::StartedByPoint => [Equal, Equal, Greater, Greater],
            Self::PointEquals => [Equal, Equal, Equal, Equal],
            Self::After => [Greater, Greater, Greater, Greater],
        }
    }

    /// Look up the relation for a set of flags
    ///
    /// Returns `None` for combinations no pair of valid ranges can produce.
    pub fn from_flags(flags: [Ordering; 4]) -> Option<Self> {
        Self::ALL.iter().copied().find(|rel| rel.flags() == flags)
    }

    /// Four letter code, e.g. `"LLLG"`
    pub fn code(&self) -> &'static str {
        match self {
            Self::Before => "LLLL",
            Self::Meets => "LLLE",
            Self::FinishedByPoint => "LLEE",
            Self::Overlaps => "LLLG",
            Self::FinishedBy => "LLEG",
            Self::Contains => "LLGG",
            Self::PointStarts => "LELE",
            Self::Starts => "LELG",
            Self::Equals => "LEEG",
            Self::StartedBy => "LEGG",
            Self::During => "LGLG",
            Self::Finishes => "LGEG",
            Self::OverlappedBy => "LGGG",
            Self::PointFinishes => "EGEG",
            Self::MetBy => "EGGG",
            Self::StartedByPoint => "EEGG",
            Self::PointEquals => "EEEE",
            Self::After => "GGGG",
        }
    }

    /// Look up a relation by its four letter code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|rel| rel.code() == code)
    }

    /// Whether the two ranges share at least one position
    pub fn is_intersection(&self) -> bool {
        !matches!(self, Self::Before | Self::After)
    }

    /// The same relation seen from r2's side
    pub fn inverse(&self) -> Self {
        let [min_max, min_min, max_max, max_min] = self.flags();
        match Self::from_flags([
            max_min.reverse(),
            min_min.reverse(),
            max_max.reverse(),
            min_max.reverse(),
        ]) {
            Some(rel) => rel,
            None => unreachable!("relation table is closed under inversion"),
        }
    }
}

impl fmt::Display for RangeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
