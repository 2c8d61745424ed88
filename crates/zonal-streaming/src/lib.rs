//! Streaming statistics over filtered samples
//!
//! Samples are pushed one at a time. Each processor screens a sample (missing,
//! NaN, NoData ranges, include/exclude ranges), counts the outcome and, if the
//! sample is accepted, folds it into its accumulator.
//!
//! - [`StreamingSampleStats`]: several statistics over one stream
//! - [`Processor`] / [`StatProcessor`]: one filtered processor
//! - [`ProcessorFactory`]: statistic to processor mapping
//! - accumulators: [`ExtremaAccumulator`], [`MomentsAccumulator`],
//!   [`SumAccumulator`], [`ExactMedianAccumulator`], [`RemedianAccumulator`]
//!
//! # Example
//!
//! ```rust
//! use zonal_core::{RangesType, Statistic};
//! use zonal_range::Range;
//! use zonal_streaming::StreamingSampleStats;
//!
//! let mut stats = StreamingSampleStats::new();
//! stats.set_statistic(Statistic::Sum).unwrap();
//! stats.add_range(&Range::point(2.0), RangesType::Exclude).unwrap();
//! stats.offer_all([1.0, 2.0, 3.0, 4.0, 5.0]);
//!
//! assert_eq!(stats.statistic(Statistic::Sum).unwrap(), 13.0);
//! assert_eq!(stats.num_accepted(Statistic::Sum).unwrap(), 4);
//! ```

pub mod extrema;
pub mod factory;
pub mod filter;
pub mod median;
pub mod moments;
pub mod processor;
pub mod remedian;
pub mod streaming;
pub mod sum;

pub use extrema::{ExtremaAccumulator, ExtremaProcessor};
pub use factory::ProcessorFactory;
pub use filter::{SampleCounts, SampleFilter, Verdict};
pub use median::{ExactMedianAccumulator, ExactMedianProcessor, DEFAULT_MEDIAN_CAPACITY};
pub use moments::{MomentsAccumulator, MomentsProcessor};
pub use processor::{Processor, SampleAccumulator, StatProcessor};
pub use remedian::{RemedianAccumulator, RemedianProcessor, DEFAULT_REMEDIAN_BASE};
pub use streaming::StreamingSampleStats;
pub use sum::{SumAccumulator, SumProcessor};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Processor, ProcessorFactory, SampleCounts, StreamingSampleStats};
    pub use zonal_core::{RangesType, Statistic};
}
