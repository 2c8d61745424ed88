//! Streaming zonal statistics
//!
//! This crate re-exports the workspace crates under one roof:
//!
//! - [`types`]: errors, the statistic enumeration and the numeric value trait
//! - [`range`]: generic ranges, the eighteen-way relation comparator and set algebra
//! - [`streaming`]: filtered single-pass statistic processors
//! - [`accumulator`]: per band and zone accumulation over sample grids
//!
//! # Features
//!
//! - `parallel`: accumulate independent bands on rayon tasks
//!
//! # Example
//!
//! ```rust
//! use zonal_stats::prelude::*;
//!
//! let data = GridSource::new(3, 1).with_band(vec![2.0, -9999.0, 4.0]).unwrap();
//! let config = ZonalConfig::builder()
//!     .statistics([Statistic::Mean, Statistic::Max])
//!     .nodata_value(-9999.0)
//!     .build()
//!     .unwrap();
//!
//! let results = ZonalStats::new(config, &data).unwrap().results().unwrap();
//! assert_eq!(results.values(), vec![3.0, 4.0]);
//! ```

pub use zonal_accumulator as accumulator;
pub use zonal_core as types;
pub use zonal_range as range;
pub use zonal_streaming as streaming;

pub use zonal_core::{Error, RangesType, Result, Statistic, VERSION};

/// Prelude module for convenient imports
pub mod prelude {
    pub use zonal_accumulator::prelude::*;
    pub use zonal_accumulator::{GridSource, ZoneGrid};
    pub use zonal_core::prelude::*;
    pub use zonal_range::prelude::*;
    pub use zonal_streaming::prelude::*;
}
