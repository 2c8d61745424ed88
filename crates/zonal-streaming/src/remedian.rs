//! Remedian estimate of the median (Rousseeuw and Bassett, 1990)
//!
//! Samples fill a buffer of `base` values. When it is full its median moves
//! to the next level's buffer and the buffer is emptied; full buffers cascade
//! upwards the same way. A value at level `k` stands for `base^k` samples, and
//! the estimate is the weighted median of everything currently held.
//!
//! Memory is `O(base * log_base(n))`. The estimate is biased on trending
//! (non-stationary) streams.

use crate::processor::{SampleAccumulator, StatProcessor};
use ordered_float::OrderedFloat;
use zonal_core::{Error, Result, Statistic};

/// Default buffer size
pub const DEFAULT_REMEDIAN_BASE: usize = 21;

#[derive(Debug, Clone)]
pub struct RemedianAccumulator {
    base: usize,
    levels: Vec<Vec<f64>>,
    count: u64,
}

/// Processor for APPROX_MEDIAN
pub type RemedianProcessor = StatProcessor<RemedianAccumulator>;

/// Validate a remedian base: odd and at least 3
pub fn check_remedian_base(base: usize) -> Result<()> {
    if base < 3 || base % 2 == 0 {
        return Err(Error::InvalidParameter(format!(
            "remedian base must be odd and at least 3, got {base}"
        )));
    }
    Ok(())
}

fn buffer_median(buffer: &mut [f64]) -> f64 {
    buffer.sort_unstable_by_key(|&v| OrderedFloat(v));
    buffer[buffer.len() / 2]
}

impl RemedianAccumulator {
    pub const STATISTICS: &'static [Statistic] = &[Statistic::ApproxMedian];

    pub fn new() -> Self {
        Self {
            base: DEFAULT_REMEDIAN_BASE,
            levels: vec![Vec::with_capacity(DEFAULT_REMEDIAN_BASE)],
            count: 0,
        }
    }

    pub fn with_base(base: usize) -> Result<Self> {
        check_remedian_base(base)?;
        Ok(Self {
            base,
            levels: vec![Vec::with_capacity(base)],
            count: 0,
        })
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// Number of buffer levels in use
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Current estimate, NaN before the first sample
    pub fn estimate(&self) -> f64 {
        match self.count {
            0 => return f64::NAN,
            1 => return self.levels[0][0],
            _ => {}
        }

        let mut weighted: Vec<(f64, f64)> = Vec::new();
        let mut weight = 1.0;
        for level in &self.levels {
            weighted.extend(level.iter().map(|&v| (v, weight)));
            weight *= self.base as f64;
        }
        weighted.sort_unstable_by_key(|&(v, _)| OrderedFloat(v));

        let half = weighted.iter().map(|&(_, w)| w).sum::<f64>() / 2.0;
        let mut cumulative = 0.0;
        for &(value, w) in &weighted {
            cumulative += w;
            if cumulative >= half {
                return value;
            }
        }
        weighted.last().map_or(f64::NAN, |&(v, _)| v)
    }
}

impl Default for RemedianAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleAccumulator for RemedianAccumulator {
    fn statistics(&self) -> &'static [Statistic] {
        Self::STATISTICS
    }

    fn update(&mut self, sample: f64) {
        self.count += 1;
        let mut carry = sample;
        let mut level = 0;
        loop {
            if level == self.levels.len() {
                self.levels.push(Vec::with_capacity(self.base));
            }
            let buffer = &mut self.levels[level];
            buffer.push(carry);
            if buffer.len() < self.base {
                break;
            }
            carry = buffer_median(buffer);
            buffer.clear();
            level += 1;
        }
    }

    fn value(&self, stat: Statistic) -> f64 {
        match stat {
            Statistic::ApproxMedian => self.estimate(),
            _ => f64::NAN,
        }
    }
}
