//! Multi-statistic streaming front end

use crate::factory::ProcessorFactory;
use crate::filter::{check_ranges_type, SampleCounts};
use crate::processor::Processor;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;
use zonal_core::{Error, RangesType, Result, Statistic};
use zonal_range::Range;

/// Computes several statistics over one stream of samples
///
/// Each requested statistic is served by a processor; related statistics
/// (MEAN/SDEV/VARIANCE, MIN/MAX/RANGE) share one. Ranges and NoData ranges are
/// remembered and replayed onto processors created later, so the order of
/// `set_statistic` and `add_range` calls does not change filtering.
///
/// # Example
///
/// ```rust
/// use zonal_streaming::StreamingSampleStats;
/// use zonal_core::Statistic;
///
/// let mut stats = StreamingSampleStats::new();
/// stats.set_statistics(&[Statistic::Mean, Statistic::Sum]).unwrap();
/// stats.offer_all([1.0, 2.0, 3.0, 4.0, 5.0]);
///
/// assert_eq!(stats.statistic(Statistic::Mean).unwrap(), 3.0);
/// assert_eq!(stats.statistic(Statistic::Sum).unwrap(), 15.0);
/// ```
#[derive(Debug, Default)]
pub struct StreamingSampleStats {
    factory: ProcessorFactory,
    processors: Vec<Box<dyn Processor>>,
    requested: BTreeSet<Statistic>,
    ranges: Vec<Range<f64>>,
    nodata_ranges: Vec<Range<f64>>,
    ranges_type: RangesType,
}

impl StreamingSampleStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a ranges type fixed up front
    pub fn with_ranges_type(ranges_type: RangesType) -> Self {
        Self {
            ranges_type,
            ..Self::default()
        }
    }

    /// Create with a custom processor factory
    pub fn with_factory(factory: ProcessorFactory) -> Self {
        Self {
            factory,
            ..Self::default()
        }
    }

    /// Request a statistic
    ///
    /// Requesting a statistic already served by a processor only records the
    /// request. Otherwise a processor is created and every range and NoData
    /// range added so far is replayed onto it.
    pub fn set_statistic(&mut self, stat: Statistic) -> Result<()> {
        if self.processor(stat).is_none() {
            let mut processor = self.factory.create(stat)?;
            processor.set_ranges_type(self.ranges_type)?;
            for range in &self.ranges {
                processor.add_range(range, self.ranges_type)?;
            }
            for range in &self.nodata_ranges {
                processor.add_nodata_range(range);
            }
            debug!(
                statistic = %stat,
                ranges = self.ranges.len(),
                nodata_ranges = self.nodata_ranges.len(),
                "registered processor"
            );
            self.processors.push(processor);
        }
        self.requested.insert(stat);
        Ok(())
    }

    pub fn set_statistics(&mut self, stats: &[Statistic]) -> Result<()> {
        stats.iter().try_for_each(|&stat| self.set_statistic(stat))
    }

    /// Statistics requested so far, in declaration order
    pub fn statistics(&self) -> impl Iterator<Item = Statistic> + '_ {
        self.requested.iter().copied()
    }

    /// Whether a value for `stat` is available (requested directly or via its group)
    pub fn is_available(&self, stat: Statistic) -> bool {
        self.processor(stat).is_some()
    }

    /// Add a data range
    ///
    /// The first range fixes the ranges type; a range of the other type is
    /// rejected before anything is stored.
    pub fn add_range(&mut self, range: &Range<f64>, ranges_type: RangesType) -> Result<()> {
        if ranges_type == RangesType::Undefined {
            return Err(Error::InvalidParameter(format!(
                "range {range} needs an include or exclude type"
            )));
        }
        check_ranges_type(self.ranges_type, ranges_type)?;
        for processor in &mut self.processors {
            processor.add_range(range, ranges_type)?;
        }
        self.ranges_type = ranges_type;
        self.ranges.push(range.clone());
        Ok(())
    }

    /// Add a range using the ranges type already fixed
    pub fn add_range_default(&mut self, range: &Range<f64>) -> Result<()> {
        self.add_range(range, self.ranges_type)
    }

    pub fn add_nodata_range(&mut self, range: &Range<f64>) {
        for processor in &mut self.processors {
            processor.add_nodata_range(range);
        }
        self.nodata_ranges.push(range.clone());
    }

    /// Treat a single value as NoData
    pub fn add_nodata_value(&mut self, value: f64) {
        self.add_nodata_range(&Range::point(value));
    }

    pub fn ranges(&self) -> &[Range<f64>] {
        &self.ranges
    }

    pub fn nodata_ranges(&self) -> &[Range<f64>] {
        &self.nodata_ranges
    }

    pub fn ranges_type(&self) -> RangesType {
        self.ranges_type
    }

    /// Offer one sample (`None` for a missing value) to every processor
    pub fn offer(&mut self, sample: Option<f64>) {
        for processor in &mut self.processors {
            processor.offer(sample);
        }
    }

    /// Offer every value of an iterator
    pub fn offer_all<I: IntoIterator<Item = f64>>(&mut self, samples: I) {
        for sample in samples {
            self.offer(Some(sample));
        }
    }

    /// Current value of a statistic
    ///
    /// Fails with [`Error::StatisticNotSet`] if no processor serves it.
    pub fn statistic(&self, stat: Statistic) -> Result<f64> {
        self.require(stat)?.get(stat)
    }

    /// Counters of the processor serving `stat`
    pub fn counts(&self, stat: Statistic) -> Result<SampleCounts> {
        Ok(self.require(stat)?.counts())
    }

    pub fn num_offered(&self, stat: Statistic) -> Result<u64> {
        Ok(self.counts(stat)?.offered)
    }

    pub fn num_accepted(&self, stat: Statistic) -> Result<u64> {
        Ok(self.counts(stat)?.accepted)
    }

    pub fn num_nan(&self, stat: Statistic) -> Result<u64> {
        Ok(self.counts(stat)?.nan)
    }

    pub fn num_nodata(&self, stat: Statistic) -> Result<u64> {
        Ok(self.counts(stat)?.nodata)
    }

    fn processor(&self, stat: Statistic) -> Option<&dyn Processor> {
        self.processors
            .iter()
            .find(|p| p.supports(stat))
            .map(|p| p.as_ref())
    }

    fn require(&self, stat: Statistic) -> Result<&dyn Processor> {
        self.processor(stat).ok_or(Error::StatisticNotSet(stat))
    }
}

impl fmt::Display for StreamingSampleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stat in self.statistics() {
            let Some(processor) = self.processor(stat) else {
                continue;
            };
            let counts = processor.counts();
            let value = processor.get(stat).unwrap_or(f64::NAN);
            writeln!(
                f,
                "{stat}: {value} (offered {}, accepted {}, nan {}, nodata {})",
                counts.offered, counts.accepted, counts.nan, counts.nodata
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_statistics() {
        let mut stats = StreamingSampleStats::new();
        stats
            .set_statistics(&[Statistic::Mean, Statistic::Sdev, Statistic::Min, Statistic::Max, Statistic::Sum])
            .unwrap();
        stats.offer_all([1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_relative_eq!(stats.statistic(Statistic::Mean).unwrap(), 3.0);
        assert_relative_eq!(stats.statistic(Statistic::Sum).unwrap(), 15.0);
        assert_relative_eq!(stats.statistic(Statistic::Min).unwrap(), 1.0);
        assert_relative_eq!(stats.statistic(Statistic::Max).unwrap(), 5.0);
        assert_relative_eq!(stats.statistic(Statistic::Sdev).unwrap(), 2.5f64.sqrt(), epsilon = 1e-12);
        assert_eq!(stats.num_accepted(Statistic::Mean).unwrap(), 5);
        assert_eq!(stats.num_offered(Statistic::Mean).unwrap(), 5);
    }

    #[test]
    fn test_group_shares_processor() {
        let mut stats = StreamingSampleStats::new();
        stats.set_statistic(Statistic::Mean).unwrap();
        stats.set_statistic(Statistic::Variance).unwrap();
        stats.offer_all([2.0, 4.0]);

        assert!(stats.is_available(Statistic::Sdev));
        assert_relative_eq!(stats.statistic(Statistic::Variance).unwrap(), 2.0);
        assert_eq!(stats.statistics().collect::<Vec<_>>(), vec![Statistic::Mean, Statistic::Variance]);
    }

    #[test]
    fn test_statistic_not_set() {
        let stats = StreamingSampleStats::new();
        assert!(matches!(
            stats.statistic(Statistic::Median),
            Err(Error::StatisticNotSet(Statistic::Median))
        ));
        assert!(stats.num_offered(Statistic::Sum).is_err());
    }

    #[test]
    fn test_set_statistic_is_idempotent() {
        let mut stats = StreamingSampleStats::new();
        stats.set_statistic(Statistic::Sum).unwrap();
        stats.offer(Some(1.0));
        stats.set_statistic(Statistic::Sum).unwrap();
        stats.offer(Some(2.0));
        assert_eq!(stats.statistic(Statistic::Sum).unwrap(), 3.0);
        assert_eq!(stats.num_offered(Statistic::Sum).unwrap(), 2);
    }

    #[test]
    fn test_ranges_replayed_onto_later_processors() {
        let mut stats = StreamingSampleStats::new();
        stats.add_range(&Range::point(2.0), RangesType::Exclude).unwrap();
        stats.add_nodata_value(-1.0);
        stats.set_statistic(Statistic::Sum).unwrap();
        stats.offer_all([1.0, 2.0, 3.0, -1.0]);

        assert_eq!(stats.statistic(Statistic::Sum).unwrap(), 4.0);
        assert_eq!(stats.num_nodata(Statistic::Sum).unwrap(), 1);
    }

    #[test]
    fn test_processor_counters_are_independent() {
        let mut stats = StreamingSampleStats::new();
        stats.set_statistic(Statistic::Sum).unwrap();
        stats.offer(Some(1.0));
        stats.set_statistic(Statistic::Max).unwrap();
        stats.offer(Some(5.0));

        assert_eq!(stats.num_offered(Statistic::Sum).unwrap(), 2);
        assert_eq!(stats.num_offered(Statistic::Max).unwrap(), 1);
    }

    #[test]
    fn test_ranges_type_conflict_leaves_state_unchanged() {
        let mut stats = StreamingSampleStats::with_ranges_type(RangesType::Include);
        stats.set_statistic(Statistic::Sum).unwrap();
        let err = stats
            .add_range(&Range::point(1.0), RangesType::Exclude)
            .unwrap_err();
        assert!(matches!(err, Error::RangesTypeConflict { .. }));
        assert!(stats.ranges().is_empty());

        stats.add_range_default(&Range::closed(0.0, 1.0).unwrap()).unwrap();
        stats.offer_all([0.5, 2.0]);
        assert_eq!(stats.statistic(Statistic::Sum).unwrap(), 0.5);
    }

    #[test]
    fn test_missing_samples_only_count_as_offered() {
        let mut stats = StreamingSampleStats::new();
        stats.set_statistic(Statistic::Mean).unwrap();
        stats.offer(None);
        stats.offer(Some(4.0));
        let counts = stats.counts(Statistic::Mean).unwrap();
        assert_eq!(counts.offered, 2);
        assert_eq!(counts.accepted, 1);
        assert_eq!(counts.nan, 0);
        assert_eq!(counts.nodata, 0);
    }

    #[test]
    fn test_display_summary() {
        let mut stats = StreamingSampleStats::new();
        stats.set_statistic(Statistic::Sum).unwrap();
        stats.offer_all([1.0, f64::NAN]);
        assert_eq!(
            stats.to_string(),
            "sum: 1 (offered 2, accepted 1, nan 1, nodata 1)\n"
        );
    }
}
