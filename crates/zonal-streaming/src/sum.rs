//! Running sum

use crate::processor::{SampleAccumulator, StatProcessor};
use zonal_core::Statistic;

#[derive(Debug, Clone, Default)]
pub struct SumAccumulator {
    sum: f64,
    count: u64,
}

/// Processor for SUM
pub type SumProcessor = StatProcessor<SumAccumulator>;

impl SumAccumulator {
    pub const STATISTICS: &'static [Statistic] = &[Statistic::Sum];

    pub fn new() -> Self {
        Self::default()
    }

    /// The sum, NaN before the first sample
    pub fn sum(&self) -> f64 {
        if self.count == 0 { f64::NAN } else { self.sum }
    }
}

impl SampleAccumulator for SumAccumulator {
    fn statistics(&self) -> &'static [Statistic] {
        Self::STATISTICS
    }

    fn update(&mut self, sample: f64) {
        self.sum += sample;
        self.count += 1;
    }

    fn value(&self, stat: Statistic) -> f64 {
        match stat {
            Statistic::Sum => self.sum(),
            _ => f64::NAN,
        }
    }
}
