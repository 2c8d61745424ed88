//! Exact median over buffered samples
//!
//! Unlike the other accumulators this one keeps every accepted sample, so its
//! memory grows with the stream. Storage is capped; samples beyond the cap are
//! dropped (with a single warning) and the median is computed over what was
//! stored. Prefer the remedian for long streams.

use crate::processor::{SampleAccumulator, StatProcessor};
use ordered_float::OrderedFloat;
use std::cell::{Cell, RefCell};
use tracing::warn;
use zonal_core::Statistic;

/// Default storage cap, in samples
pub const DEFAULT_MEDIAN_CAPACITY: usize = 50_000_000;

#[derive(Debug, Clone)]
pub struct ExactMedianAccumulator {
    values: RefCell<Vec<f64>>,
    sorted: Cell<bool>,
    capacity: usize,
    dropped: u64,
}

/// Processor for MEDIAN
pub type ExactMedianProcessor = StatProcessor<ExactMedianAccumulator>;

impl ExactMedianAccumulator {
    pub const STATISTICS: &'static [Statistic] = &[Statistic::Median];

    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEDIAN_CAPACITY)
    }

    /// Store at most `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: RefCell::new(Vec::new()),
            sorted: Cell::new(true),
            capacity,
            dropped: 0,
        }
    }

    /// Number of samples held for the median
    pub fn stored(&self) -> usize {
        self.values.borrow().len()
    }

    /// Number of accepted samples dropped after the cap was reached
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn median(&self) -> f64 {
        let mut values = self.values.borrow_mut();
        if values.is_empty() {
            return f64::NAN;
        }
        if !self.sorted.get() {
            values.sort_unstable_by_key(|&v| OrderedFloat(v));
            self.sorted.set(true);
        }
        let n = values.len();
        if n % 2 == 1 {
            values[n / 2]
        } else {
            (values[n / 2 - 1] + values[n / 2]) / 2.0
        }
    }
}

impl Default for ExactMedianAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleAccumulator for ExactMedianAccumulator {
    fn statistics(&self) -> &'static [Statistic] {
        Self::STATISTICS
    }

    fn update(&mut self, sample: f64) {
        let values = self.values.get_mut();
        if values.len() >= self.capacity {
            if self.dropped == 0 {
                warn!(
                    capacity = self.capacity,
                    "exact median storage is full; further samples are ignored (use approx_median for long streams)"
                );
            }
            self.dropped += 1;
            return;
        }
        values.push(sample);
        self.sorted.set(false);
    }

    fn value(&self, stat: Statistic) -> f64 {
        match stat {
            Statistic::Median => self.median(),
            _ => f64::NAN,
        }
    }
}
