//! Core error, numeric and statistic types for zonal statistics
//!
//! This crate provides the vocabulary shared by the rest of the workspace:
//!
//! - [`Error`] / [`Result`]: the unified error type
//! - [`RangeValue`]: what a numeric type must provide to bound a range
//! - [`Statistic`]: the closed set of statistics that can be accumulated
//! - [`RangesType`]: whether data ranges include or exclude samples
//!
//! # Example
//!
//! ```rust
//! use zonal_core::{RangesType, Statistic};
//!
//! let stat: Statistic = "sdev".parse().unwrap();
//! assert_eq!(stat, Statistic::Sdev);
//! assert_eq!(RangesType::default(), RangesType::Undefined);
//! ```

pub mod error;
pub mod numeric;
pub mod statistic;

// Re-export core types
pub use error::{Error, Result};
pub use numeric::RangeValue;
pub use statistic::{RangesType, Statistic};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{RangeValue, RangesType, Result, Statistic};
}
