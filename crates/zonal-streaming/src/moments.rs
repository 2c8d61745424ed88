//! Mean, variance and standard deviation with Welford's algorithm

use crate::processor::{SampleAccumulator, StatProcessor};
use zonal_core::Statistic;

/// Online first and second moments
///
/// Uses Welford's update, which avoids the cancellation of the naive
/// sum-of-squares formula:
///
/// ```text
/// n     += 1
/// delta  = x - mean
/// mean  += delta / n
/// m2    += delta * (x - mean)
/// ```
///
/// Variance and standard deviation are sample statistics (`n - 1`
/// denominator) and need at least two samples.
#[derive(Debug, Clone, Default)]
pub struct MomentsAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

/// Processor for MEAN, SDEV and VARIANCE
pub type MomentsProcessor = StatProcessor<MomentsAccumulator>;

impl MomentsAccumulator {
    pub const STATISTICS: &'static [Statistic] =
        &[Statistic::Mean, Statistic::Sdev, Statistic::Variance];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 { f64::NAN } else { self.mean }
    }

    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            f64::NAN
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn sdev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl SampleAccumulator for MomentsAccumulator {
    fn statistics(&self) -> &'static [Statistic] {
        Self::STATISTICS
    }

    fn update(&mut self, sample: f64) {
        self.count += 1;
        let delta = sample - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (sample - self.mean);
    }

    fn value(&self, stat: Statistic) -> f64 {
        match stat {
            Statistic::Mean => self.mean(),
            Statistic::Variance => self.variance(),
            Statistic::Sdev => self.sdev(),
            _ => f64::NAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moments_of_one_to_five() {
        let mut acc = MomentsAccumulator::new();
        for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
            acc.update(x);
        }
        assert_relative_eq!(acc.mean(), 3.0);
        assert_relative_eq!(acc.variance(), 2.5);
        assert_relative_eq!(acc.sdev(), 2.5f64.sqrt());
    }

    #[test]
    fn test_variance_needs_two_samples() {
        let mut acc = MomentsAccumulator::new();
        assert!(acc.mean().is_nan());
        acc.update(42.0);
        assert_eq!(acc.mean(), 42.0);
        assert!(acc.variance().is_nan());
        assert!(acc.value(Statistic::Sdev).is_nan());
    }

    #[test]
    fn test_large_offset_is_stable() {
        let mut acc = MomentsAccumulator::new();
        for x in [1e9 + 4.0, 1e9 + 7.0, 1e9 + 13.0, 1e9 + 16.0] {
            acc.update(x);
        }
        assert_relative_eq!(acc.variance(), 30.0, epsilon = 1e-6);
    }
}
