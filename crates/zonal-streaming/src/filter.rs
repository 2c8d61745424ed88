//! Sample screening: NaN, NoData and include/exclude ranges

use zonal_core::{Error, RangesType, Result};
use zonal_range::Range;

/// Outcome of screening one non-missing sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Passed every check
    Accepted,
    /// The sample was NaN (also counts as NoData)
    NaN,
    /// The sample fell in a NoData range
    NoData,
    /// Rejected by the include/exclude ranges
    Filtered,
}

/// Per-processor sample counters
///
/// Every processor keeps its own counts; processors added at different times
/// see different sub-streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleCounts {
    /// Every call to `offer`, missing samples included
    pub offered: u64,
    /// Samples that reached the accumulator
    pub accepted: u64,
    /// NaN samples
    pub nan: u64,
    /// NaN samples plus samples inside a NoData range
    pub nodata: u64,
}

impl SampleCounts {
    /// Record one offer and its outcome (`None` for a missing sample)
    pub fn record(&mut self, verdict: Option<Verdict>) {
        self.offered += 1;
        match verdict {
            Some(Verdict::Accepted) => self.accepted += 1,
            Some(Verdict::NaN) => {
                self.nan += 1;
                self.nodata += 1;
            }
            Some(Verdict::NoData) => self.nodata += 1,
            Some(Verdict::Filtered) | None => {}
        }
    }
}

/// Data ranges and NoData ranges applied before a sample is accumulated
#[derive(Debug, Clone, Default)]
pub struct SampleFilter {
    ranges: Vec<Range<f64>>,
    nodata_ranges: Vec<Range<f64>>,
    ranges_type: RangesType,
}

impl SampleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the ranges type
    ///
    /// Setting the current type again is a no-op; changing a fixed type fails.
    pub fn set_ranges_type(&mut self, ranges_type: RangesType) -> Result<()> {
        check_ranges_type(self.ranges_type, ranges_type)?;
        if ranges_type != RangesType::Undefined {
            self.ranges_type = ranges_type;
        }
        Ok(())
    }

    /// Add a data range; the first one fixes the ranges type
    pub fn add_range(&mut self, range: &Range<f64>, ranges_type: RangesType) -> Result<()> {
        if ranges_type == RangesType::Undefined {
            return Err(Error::InvalidParameter(format!(
                "range {range} needs an include or exclude type"
            )));
        }
        self.set_ranges_type(ranges_type)?;
        self.ranges.push(range.clone());
        Ok(())
    }

    pub fn add_nodata_range(&mut self, range: &Range<f64>) {
        self.nodata_ranges.push(range.clone());
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

    /// Screen a sample: NaN first, then NoData ranges, then data ranges
    pub fn classify(&self, sample: f64) -> Verdict {
        if sample.is_nan() {
            return Verdict::NaN;
        }
        if self.nodata_ranges.iter().any(|r| r.contains(sample)) {
            return Verdict::NoData;
        }
        let accepted = match self.ranges_type {
            RangesType::Exclude => self.ranges.iter().all(|r| !r.contains(sample)),
            RangesType::Include => self.ranges.iter().any(|r| r.contains(sample)),
            RangesType::Undefined => true,
        };
        if accepted {
            Verdict::Accepted
        } else {
            Verdict::Filtered
        }
    }
}

/// Check that `requested` may follow `current`
///
/// An `Undefined` current type accepts anything; a fixed type only accepts
/// itself (or `Undefined`, which leaves it unchanged).
pub fn check_ranges_type(current: RangesType, requested: RangesType) -> Result<()> {
    match (current, requested) {
        (RangesType::Undefined, _) | (_, RangesType::Undefined) => Ok(()),
        (c, r) if c == r => Ok(()),
        (current, requested) => Err(Error::RangesTypeConflict { current, requested }),
    }
}
