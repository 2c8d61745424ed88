//! Generic ranges, their relations and set algebra
//!
//! This crate provides:
//!
//! - [`Range`]: an immutable interval or point over any [`RangeValue`]
//! - [`RangeRelation`]: the eighteen ways two ranges can sit relative to each other
//! - [`RangeComparator`]: classification of a pair of ranges
//! - [`algebra`]: intersection, subtraction, complement, simplification and sorting
//!
//! # Example
//!
//! ```rust
//! use zonal_range::{algebra, Range, RangeComparator, RangeRelation};
//!
//! let a = Range::closed(0.0, 2.0).unwrap();
//! let b = Range::closed(1.0, 3.0).unwrap();
//! assert_eq!(RangeComparator::compare(&a, &b), RangeRelation::Overlaps);
//!
//! let merged = algebra::simplify(&[a, b]);
//! assert_eq!(merged, vec![Range::closed(0.0, 3.0).unwrap()]);
//! ```

pub mod algebra;
pub mod comparator;
pub mod range;
pub mod relation;

pub use comparator::RangeComparator;
pub use range::{Direction, Endpoint, PointKind, Range, RangeSpec};
pub use relation::RangeRelation;
pub use zonal_core::{Error, RangeValue, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algebra;
    pub use crate::{Direction, Range, RangeComparator, RangeRelation};
}
