//! Zonal accumulation of streaming statistics
//!
//! Samples are grouped by band and by integer zone label; every group gets its
//! own [`StreamingSampleStats`](zonal_streaming::StreamingSampleStats). Results
//! come back as a flat table that can be narrowed by band, zone, statistic and
//! applied ranges.
//!
//! - [`ZonalConfig`]: what to compute, loadable from JSON
//! - [`ZonalAccumulator`]: push samples one at a time with their zone and band
//! - [`ZonalStats`]: run a full pass over a [`SampleSource`] and optional
//!   [`ZoneSource`], region of interest and coordinate transform
//! - [`ResultSet`]: filtered views over the results
//!
//! # Design Philosophy
//!
//! Accumulation is push-based and holds no sample data beyond what the
//! statistics need, so zones of any size can be processed in one pass. Bands
//! share nothing, which makes them the unit of parallel work.
//!
//! # Example
//!
//! ```rust
//! use zonal_accumulator::{ZonalAccumulator, ZonalConfig};
//! use zonal_core::{RangesType, Statistic};
//! use zonal_range::Range;
//!
//! let config = ZonalConfig::builder()
//!     .statistics([Statistic::Min, Statistic::Max])
//!     .range(Range::at_least(0.0).unwrap())
//!     .ranges_type(RangesType::Include)
//!     .build()
//!     .unwrap();
//! let mut acc = ZonalAccumulator::new(config).unwrap();
//! acc.offer_all([-3.0, 4.0, 9.0], 1, 0).unwrap();
//!
//! let results = acc.results();
//! assert_eq!(results.zone(1).values(), vec![4.0, 9.0]);
//! ```

pub mod accumulator;
pub mod config;
pub mod results;
pub mod runner;
pub mod source;

pub use accumulator::ZonalAccumulator;
pub use config::{ExecutionStrategy, ZonalConfig, ZonalConfigBuilder};
pub use results::{ResultSet, ZonalResult};
pub use runner::ZonalStats;
pub use source::{
    AffineTransform, CoordinateTransform, FnRegion, GridSource, IdentityTransform, RectRegion,
    RegionOfInterest, SampleSource, ZoneGrid, ZoneSource,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ExecutionStrategy, ResultSet, SampleSource, ZonalAccumulator, ZonalConfig, ZonalResult,
        ZonalStats, ZoneSource,
    };
    pub use zonal_core::{RangesType, Statistic};
}
