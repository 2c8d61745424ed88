//! Running minimum, maximum and range

use crate::processor::{SampleAccumulator, StatProcessor};
use zonal_core::Statistic;

/// Tracks the smallest and largest accepted sample
#[derive(Debug, Clone)]
pub struct ExtremaAccumulator {
    min: f64,
    max: f64,
    count: u64,
}

/// Processor for MIN, MAX and RANGE
pub type ExtremaProcessor = StatProcessor<ExtremaAccumulator>;

impl ExtremaAccumulator {
    pub const STATISTICS: &'static [Statistic] =
        &[Statistic::Min, Statistic::Max, Statistic::Range];

    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }

    pub fn min(&self) -> f64 {
        if self.count == 0 { f64::NAN } else { self.min }
    }

    pub fn max(&self) -> f64 {
        if self.count == 0 { f64::NAN } else { self.max }
    }

    pub fn range(&self) -> f64 {
        self.max() - self.min()
    }
}

impl Default for ExtremaAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleAccumulator for ExtremaAccumulator {
    fn statistics(&self) -> &'static [Statistic] {
        Self::STATISTICS
    }

    fn update(&mut self, sample: f64) {
        self.min = self.min.min(sample);
        self.max = self.max.max(sample);
        self.count += 1;
    }

    fn value(&self, stat: Statistic) -> f64 {
        match stat {
            Statistic::Min => self.min(),
            Statistic::Max => self.max(),
            Statistic::Range => self.range(),
            _ => f64::NAN,
        }
    }
}
