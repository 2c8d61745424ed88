//! Static mapping from statistics to processors
//!
//! The set of statistics is closed, so the factory is a plain match rather
//! than a runtime registry. Related statistics share one processor:
//!
//! | Processor | Statistics |
//! |-----------|------------|
//! | moments | MEAN, SDEV, VARIANCE |
//! | extrema | MIN, MAX, RANGE |
//! | sum | SUM |
//! | exact median | MEDIAN |
//! | remedian | APPROX_MEDIAN |

use crate::extrema::ExtremaAccumulator;
use crate::median::{ExactMedianAccumulator, DEFAULT_MEDIAN_CAPACITY};
use crate::moments::MomentsAccumulator;
use crate::processor::{Processor, StatProcessor};
use crate::remedian::{check_remedian_base, RemedianAccumulator, DEFAULT_REMEDIAN_BASE};
use crate::sum::SumAccumulator;
use tracing::debug;
use zonal_core::{Result, Statistic};

/// Creates processors with shared tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorFactory {
    median_capacity: usize,
    remedian_base: usize,
}

impl Default for ProcessorFactory {
    fn default() -> Self {
        Self {
            median_capacity: DEFAULT_MEDIAN_CAPACITY,
            remedian_base: DEFAULT_REMEDIAN_BASE,
        }
    }
}

impl ProcessorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage cap for exact median processors
    pub fn with_median_capacity(mut self, capacity: usize) -> Self {
        self.median_capacity = capacity;
        self
    }

    /// Buffer size for remedian processors (odd, at least 3)
    pub fn with_remedian_base(mut self, base: usize) -> Result<Self> {
        check_remedian_base(base)?;
        self.remedian_base = base;
        Ok(self)
    }

    pub fn median_capacity(&self) -> usize {
        self.median_capacity
    }

    pub fn remedian_base(&self) -> usize {
        self.remedian_base
    }

    /// The statistics served by the processor that serves `stat`
    pub fn group(stat: Statistic) -> &'static [Statistic] {
        match stat {
            Statistic::Mean | Statistic::Sdev | Statistic::Variance => MomentsAccumulator::STATISTICS,
            Statistic::Min | Statistic::Max | Statistic::Range => ExtremaAccumulator::STATISTICS,
            Statistic::Sum => SumAccumulator::STATISTICS,
            Statistic::Median => ExactMedianAccumulator::STATISTICS,
            Statistic::ApproxMedian => RemedianAccumulator::STATISTICS,
        }
    }

    /// Create a fresh processor supporting `stat`
    pub fn create(&self, stat: Statistic) -> Result<Box<dyn Processor>> {
        debug!(statistic = %stat, group = ?Self::group(stat), "creating processor");
        let processor: Box<dyn Processor> = match stat {
            Statistic::Mean | Statistic::Sdev | Statistic::Variance => {
                Box::new(StatProcessor::new(MomentsAccumulator::new()))
            }
            Statistic::Min | Statistic::Max | Statistic::Range => {
                Box::new(StatProcessor::new(ExtremaAccumulator::new()))
            }
            Statistic::Sum => Box::new(StatProcessor::new(SumAccumulator::new())),
            Statistic::Median => Box::new(StatProcessor::new(
                ExactMedianAccumulator::with_capacity(self.median_capacity),
            )),
            Statistic::ApproxMedian => Box::new(StatProcessor::new(RemedianAccumulator::with_base(
                self.remedian_base,
            )?)),
        };
        Ok(processor)
    }
}
