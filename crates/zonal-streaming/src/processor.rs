//! Processor abstraction and the generic filtered processor
//!
//! A processor owns the running state for one group of related statistics.
//! [`StatProcessor`] pairs a [`SampleFilter`] (NaN, NoData and data ranges)
//! with a [`SampleAccumulator`] that only ever sees accepted samples.
//!
//! # Design Philosophy
//!
//! - **Private counters**: each processor counts its own offers
//! - **Filter once**: accumulators never see rejected samples
//! - **Object safe**: processors are stored as `Box<dyn Processor>`

use crate::filter::{SampleCounts, SampleFilter, Verdict};
use std::fmt::Debug;
use zonal_core::{Error, RangesType, Result, Statistic};
use zonal_range::Range;

/// Running state for a group of statistics over accepted samples
pub trait SampleAccumulator: Debug + Send {
    /// Statistics this accumulator can report
    fn statistics(&self) -> &'static [Statistic];

    /// Fold in one accepted sample
    fn update(&mut self, sample: f64);

    /// Current value of `stat`, NaN when not enough samples were accepted
    ///
    /// Only called with statistics returned by [`Self::statistics`].
    fn value(&self, stat: Statistic) -> f64;
}

/// A filtered statistic processor
pub trait Processor: Debug + Send {
    /// Statistics this processor can report
    fn supported_statistics(&self) -> &'static [Statistic];

    fn supports(&self, stat: Statistic) -> bool {
        self.supported_statistics().contains(&stat)
    }

    /// Add a data range; the first one fixes the ranges type
    fn add_range(&mut self, range: &Range<f64>, ranges_type: RangesType) -> Result<()>;

    /// Fix the ranges type without adding a range
    fn set_ranges_type(&mut self, ranges_type: RangesType) -> Result<()>;

    fn add_nodata_range(&mut self, range: &Range<f64>);

    /// Offer one sample (`None` for a missing value); returns whether it was accepted
    fn offer(&mut self, sample: Option<f64>) -> bool;

    /// Current value of a supported statistic
    fn get(&self, stat: Statistic) -> Result<f64>;

    fn counts(&self) -> SampleCounts;

    fn ranges(&self) -> &[Range<f64>];

    fn nodata_ranges(&self) -> &[Range<f64>];

    fn ranges_type(&self) -> RangesType;
}

/// Processor made of a sample filter and an accumulator
#[derive(Debug, Clone)]
pub struct StatProcessor<A> {
    filter: SampleFilter,
    counts: SampleCounts,
    accumulator: A,
}

impl<A: SampleAccumulator> StatProcessor<A> {
    pub fn new(accumulator: A) -> Self {
        Self {
            filter: SampleFilter::new(),
            counts: SampleCounts::default(),
            accumulator,
        }
    }

    pub fn accumulator(&self) -> &A {
        &self.accumulator
    }

    pub fn filter(&self) -> &SampleFilter {
        &self.filter
    }

    /// Offer every value of an iterator
    pub fn offer_all<I: IntoIterator<Item = f64>>(&mut self, samples: I) {
        for sample in samples {
            self.offer(Some(sample));
        }
    }
}

impl<A: SampleAccumulator> Processor for StatProcessor<A> {
    fn supported_statistics(&self) -> &'static [Statistic] {
        self.accumulator.statistics()
    }

    fn add_range(&mut self, range: &Range<f64>, ranges_type: RangesType) -> Result<()> {
        self.filter.add_range(range, ranges_type)
    }

    fn set_ranges_type(&mut self, ranges_type: RangesType) -> Result<()> {
        self.filter.set_ranges_type(ranges_type)
    }

    fn add_nodata_range(&mut self, range: &Range<f64>) {
        self.filter.add_nodata_range(range);
    }

    fn offer(&mut self, sample: Option<f64>) -> bool {
        let verdict = sample.map(|x| (x, self.filter.classify(x)));
        self.counts.record(verdict.map(|(_, v)| v));
        match verdict {
            Some((x, Verdict::Accepted)) => {
                self.accumulator.update(x);
                true
            }
            _ => false,
        }
    }

    fn get(&self, stat: Statistic) -> Result<f64> {
        if !self.supports(stat) {
            return Err(Error::UnsupportedStatistic(stat));
        }
        Ok(self.accumulator.value(stat))
    }

    fn counts(&self) -> SampleCounts {
        self.counts
    }

    fn ranges(&self) -> &[Range<f64>] {
        self.filter.ranges()
    }

    fn nodata_ranges(&self) -> &[Range<f64>] {
        self.filter.nodata_ranges()
    }

    fn ranges_type(&self) -> RangesType {
        self.filter.ranges_type()
    }
}
