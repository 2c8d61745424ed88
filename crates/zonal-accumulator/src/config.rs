//! Configuration for zonal accumulation
//!
//! A [`ZonalConfig`] is built with [`ZonalConfigBuilder`] or loaded from JSON.
//! Both paths end in [`ZonalConfig::validate`].
//!
//! # Example
//!
//! ```rust
//! use zonal_accumulator::ZonalConfig;
//!
//! let config = ZonalConfig::from_json(r#"{
//!     "statistics": ["mean", "approx_median"],
//!     "ranges": [{"min": 0.0, "max": 100.0}],
//!     "ranges_type": "include",
//!     "nodata_values": [-9999.0]
//! }"#).unwrap();
//! assert_eq!(config.statistics().len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use zonal_core::{Error, RangesType, Result, Statistic};
use zonal_range::Range;
use zonal_streaming::remedian::check_remedian_base;
use zonal_streaming::{ProcessorFactory, StreamingSampleStats, DEFAULT_MEDIAN_CAPACITY, DEFAULT_REMEDIAN_BASE};

/// How independent bands are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// One band after the other on the calling thread
    #[default]
    Sequential,
    /// Bands on separate rayon tasks (needs the `parallel` feature)
    Parallel,
    /// Parallel when more than one band is requested and the feature is enabled
    Auto,
}

impl ExecutionStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExecutionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            "auto" => Ok(Self::Auto),
            other => Err(Error::InvalidParameter(format!(
                "unknown execution strategy '{other}'"
            ))),
        }
    }
}

fn default_median_capacity() -> usize {
    DEFAULT_MEDIAN_CAPACITY
}

fn default_remedian_base() -> usize {
    DEFAULT_REMEDIAN_BASE
}

/// What to compute and how to filter samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonalConfig {
    statistics: Vec<Statistic>,
    /// Band indices; empty means every band of the source
    #[serde(default)]
    bands: Vec<usize>,
    #[serde(default)]
    ranges: Vec<Range<f64>>,
    #[serde(default)]
    ranges_type: RangesType,
    #[serde(default)]
    nodata_ranges: Vec<Range<f64>>,
    #[serde(default)]
    nodata_values: Vec<f64>,
    /// Accumulate each range separately instead of filtering with all of them
    #[serde(default)]
    local_ranges: bool,
    #[serde(default = "default_median_capacity")]
    median_capacity: usize,
    #[serde(default = "default_remedian_base")]
    remedian_base: usize,
    #[serde(default)]
    execution: ExecutionStrategy,
}

impl Default for ZonalConfig {
    fn default() -> Self {
        Self {
            statistics: Vec::new(),
            bands: Vec::new(),
            ranges: Vec::new(),
            ranges_type: RangesType::Undefined,
            nodata_ranges: Vec::new(),
            nodata_values: Vec::new(),
            local_ranges: false,
            median_capacity: DEFAULT_MEDIAN_CAPACITY,
            remedian_base: DEFAULT_REMEDIAN_BASE,
            execution: ExecutionStrategy::Sequential,
        }
    }
}

// NaN is a valid NoData value and must compare equal to itself
fn same_values(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
}

impl PartialEq for ZonalConfig {
    fn eq(&self, other: &Self) -> bool {
        self.statistics == other.statistics
            && self.bands == other.bands
            && self.ranges == other.ranges
            && self.ranges_type == other.ranges_type
            && self.nodata_ranges == other.nodata_ranges
            && same_values(&self.nodata_values, &other.nodata_values)
            && self.local_ranges == other.local_ranges
            && self.median_capacity == other.median_capacity
            && self.remedian_base == other.remedian_base
            && self.execution == other.execution
    }
}

impl ZonalConfig {
    pub fn builder() -> ZonalConfigBuilder {
        ZonalConfigBuilder::new()
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.statistics.is_empty() {
            return Err(Error::invalid_config("at least one statistic is required"));
        }
        if !self.ranges.is_empty() && self.ranges_type == RangesType::Undefined {
            return Err(Error::invalid_config(
                "data ranges need an include or exclude ranges type",
            ));
        }
        if self.local_ranges {
            if self.ranges_type == RangesType::Undefined {
                return Err(Error::invalid_config(
                    "local range statistics need an include or exclude ranges type",
                ));
            }
            if self.ranges.is_empty() {
                return Err(Error::invalid_config(
                    "local range statistics need at least one range",
                ));
            }
        }
        if self.median_capacity == 0 {
            return Err(Error::invalid_config("median capacity must be positive"));
        }
        check_remedian_base(self.remedian_base)
            .map_err(|e| Error::invalid_config(e.to_string()))?;
        Ok(())
    }

    pub fn statistics(&self) -> &[Statistic] {
        &self.statistics
    }

    pub fn bands(&self) -> &[usize] {
        &self.bands
    }

    pub fn ranges(&self) -> &[Range<f64>] {
        &self.ranges
    }

    pub fn ranges_type(&self) -> RangesType {
        self.ranges_type
    }

    pub fn nodata_ranges(&self) -> &[Range<f64>] {
        &self.nodata_ranges
    }

    pub fn nodata_values(&self) -> &[f64] {
        &self.nodata_values
    }

    pub fn local_ranges(&self) -> bool {
        self.local_ranges
    }

    pub fn median_capacity(&self) -> usize {
        self.median_capacity
    }

    pub fn remedian_base(&self) -> usize {
        self.remedian_base
    }

    pub fn execution(&self) -> ExecutionStrategy {
        self.execution
    }

    pub fn processor_factory(&self) -> Result<ProcessorFactory> {
        ProcessorFactory::new()
            .with_median_capacity(self.median_capacity)
            .with_remedian_base(self.remedian_base)
    }

    /// The range subsets that each get their own accumulation
    ///
    /// One subset with every range normally; one subset per range in local mode.
    pub fn range_subsets(&self) -> Vec<Vec<Range<f64>>> {
        if self.local_ranges {
            self.ranges.iter().map(|r| vec![r.clone()]).collect()
        } else {
            vec![self.ranges.clone()]
        }
    }

    /// Fresh streaming statistics filtered by `ranges` and this config's NoData settings
    pub fn new_stats(&self, ranges: &[Range<f64>]) -> Result<StreamingSampleStats> {
        let mut stats = StreamingSampleStats::with_factory(self.processor_factory()?);
        for range in ranges {
            stats.add_range(range, self.ranges_type)?;
        }
        for range in &self.nodata_ranges {
            stats.add_nodata_range(range);
        }
        for &value in &self.nodata_values {
            stats.add_nodata_value(value);
        }
        stats.set_statistics(&self.statistics)?;
        Ok(stats)
    }
}

/// Builder for [`ZonalConfig`]
#[derive(Debug, Clone, Default)]
pub struct ZonalConfigBuilder {
    config: ZonalConfig,
}

impl ZonalConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a statistic (duplicates are ignored)
    pub fn statistic(mut self, stat: Statistic) -> Self {
        if !self.config.statistics.contains(&stat) {
            self.config.statistics.push(stat);
        }
        self
    }

    pub fn statistics<I: IntoIterator<Item = Statistic>>(self, stats: I) -> Self {
        stats.into_iter().fold(self, Self::statistic)
    }

    pub fn band(mut self, band: usize) -> Self {
        if !self.config.bands.contains(&band) {
            self.config.bands.push(band);
        }
        self
    }

    pub fn bands<I: IntoIterator<Item = usize>>(self, bands: I) -> Self {
        bands.into_iter().fold(self, Self::band)
    }

    /// Add a data range; its meaning comes from [`Self::ranges_type`]
    pub fn range(mut self, range: Range<f64>) -> Self {
        self.config.ranges.push(range);
        self
    }

    pub fn ranges_type(mut self, ranges_type: RangesType) -> Self {
        self.config.ranges_type = ranges_type;
        self
    }

    pub fn nodata_range(mut self, range: Range<f64>) -> Self {
        self.config.nodata_ranges.push(range);
        self
    }

    pub fn nodata_value(mut self, value: f64) -> Self {
        self.config.nodata_values.push(value);
        self
    }

    pub fn local_ranges(mut self, local: bool) -> Self {
        self.config.local_ranges = local;
        self
    }

    pub fn median_capacity(mut self, capacity: usize) -> Self {
        self.config.median_capacity = capacity;
        self
    }

    pub fn remedian_base(mut self, base: usize) -> Self {
        self.config.remedian_base = base;
        self
    }

    pub fn execution(mut self, strategy: ExecutionStrategy) -> Self {
        self.config.execution = strategy;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<ZonalConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
