//! Full-grid zonal statistics
//!
//! [`ZonalStats`] walks every pixel of every requested band, looks up its zone
//! and feeds a [`ZonalAccumulator`]. Bands are independent accumulation units;
//! with the `parallel` feature they can run on separate rayon tasks and are
//! merged afterwards.

use crate::accumulator::ZonalAccumulator;
use crate::config::{ExecutionStrategy, ZonalConfig};
use crate::results::ResultSet;
use crate::source::{CoordinateTransform, RegionOfInterest, SampleSource, ZoneSource};
use std::cell::OnceCell;
use std::collections::BTreeSet;
use tracing::{debug, instrument, trace};
use zonal_core::{Error, Result};

/// Read-only view of everything a band pass needs
#[derive(Clone, Copy)]
struct BandWalker<'a> {
    config: &'a ZonalConfig,
    source: &'a dyn SampleSource,
    zones: Option<&'a dyn ZoneSource>,
    roi: Option<&'a dyn RegionOfInterest>,
    transform: Option<&'a dyn CoordinateTransform>,
}

impl BandWalker<'_> {
    fn zone_of(&self, x: f64, y: f64) -> Option<i32> {
        match self.zones {
            None => Some(0),
            Some(zones) => {
                let (zx, zy) = self
                    .transform
                    .map_or((x, y), |t| t.to_zone_space(x, y));
                zones.zone_at(zx, zy)
            }
        }
    }

    fn accumulate_band(&self, band: usize, zones: &BTreeSet<i32>) -> Result<ZonalAccumulator> {
        let mut acc = ZonalAccumulator::new(self.config.clone())?;
        acc.register_zones(band, zones.iter().copied())?;

        let mut skipped = 0u64;
        for row in 0..self.source.height() {
            for col in 0..self.source.width() {
                let (x, y) = (col as f64 + 0.5, row as f64 + 0.5);
                if self.roi.is_some_and(|roi| !roi.contains(x, y)) {
                    continue;
                }
                match self.zone_of(x, y) {
                    Some(zone) => acc.offer(self.source.sample(band, col, row), zone, band)?,
                    None => skipped += 1,
                }
            }
        }
        trace!(band, skipped, "band accumulated");
        Ok(acc)
    }

    #[cfg(feature = "parallel")]
    fn run(&self, bands: &[usize], zones: &BTreeSet<i32>, parallel: bool) -> Result<Vec<ZonalAccumulator>> {
        if parallel {
            use rayon::prelude::*;
            return bands
                .par_iter()
                .map(|&band| self.accumulate_band(band, zones))
                .collect();
        }
        bands
            .iter()
            .map(|&band| self.accumulate_band(band, zones))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run(&self, bands: &[usize], zones: &BTreeSet<i32>, parallel: bool) -> Result<Vec<ZonalAccumulator>> {
        if parallel {
            debug!("built without the parallel feature; running bands sequentially");
        }
        bands
            .iter()
            .map(|&band| self.accumulate_band(band, zones))
            .collect()
    }
}

/// Zonal statistics over a sample grid
///
/// Results are computed on the first call to [`ZonalStats::results`] and
/// reused afterwards.
///
/// # Example
///
/// ```rust
/// use zonal_accumulator::{GridSource, ZonalConfig, ZonalStats, ZoneGrid};
/// use zonal_core::Statistic;
///
/// let data = GridSource::new(2, 2).with_band(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let zones = ZoneGrid::new(2, 2, vec![1, 1, 2, 2]).unwrap();
/// let config = ZonalConfig::builder().statistic(Statistic::Sum).build().unwrap();
///
/// let stats = ZonalStats::new(config, &data).unwrap().with_zones(&zones);
/// let results = stats.results().unwrap();
/// assert_eq!(results.zone(1).values(), vec![3.0]);
/// assert_eq!(results.zone(2).values(), vec![7.0]);
/// ```
pub struct ZonalStats<'a> {
    config: ZonalConfig,
    source: &'a dyn SampleSource,
    zones: Option<&'a dyn ZoneSource>,
    roi: Option<&'a dyn RegionOfInterest>,
    transform: Option<&'a dyn CoordinateTransform>,
    results: OnceCell<ResultSet>,
}

impl<'a> ZonalStats<'a> {
    pub fn new(config: ZonalConfig, source: &'a dyn SampleSource) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            zones: None,
            roi: None,
            transform: None,
            results: OnceCell::new(),
        })
    }

    /// Label pixels with zones; without this every pixel is in zone 0
    pub fn with_zones(mut self, zones: &'a dyn ZoneSource) -> Self {
        self.zones = Some(zones);
        self.results = OnceCell::new();
        self
    }

    /// Only sample pixels whose centre lies in the region
    pub fn with_roi(mut self, roi: &'a dyn RegionOfInterest) -> Self {
        self.roi = Some(roi);
        self.results = OnceCell::new();
        self
    }

    /// Map pixel centres into zone space before the zone lookup
    pub fn with_transform(mut self, transform: &'a dyn CoordinateTransform) -> Self {
        self.transform = Some(transform);
        self.results = OnceCell::new();
        self
    }

    pub fn config(&self) -> &ZonalConfig {
        &self.config
    }

    /// Bands to process, checked against the source
    ///
    /// Repeated bands are processed once, in order of first appearance.
    pub fn bands(&self) -> Result<Vec<usize>> {
        let available = self.source.band_count();
        if self.config.bands().is_empty() {
            return Ok((0..available).collect());
        }
        let mut bands = Vec::with_capacity(self.config.bands().len());
        for &band in self.config.bands() {
            if band >= available {
                return Err(Error::invalid_config(format!(
                    "band {band} requested but the source has {available} band(s)"
                )));
            }
            if !bands.contains(&band) {
                bands.push(band);
            }
        }
        Ok(bands)
    }

    /// Zones present in the zone source, or zone 0 alone when there is none
    pub fn zones(&self) -> BTreeSet<i32> {
        match self.zones {
            Some(zones) => zones.distinct_zones(),
            None => BTreeSet::from([0]),
        }
    }

    fn parallel(&self, band_count: usize) -> bool {
        match self.config.execution() {
            ExecutionStrategy::Sequential => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => band_count > 1,
        }
    }

    /// Results of the full pass, computed once
    pub fn results(&self) -> Result<ResultSet> {
        if let Some(results) = self.results.get() {
            return Ok(results.clone());
        }
        let results = self.compute()?;
        Ok(self.results.get_or_init(|| results).clone())
    }

    #[instrument(skip(self), fields(
        width = self.source.width(),
        height = self.source.height(),
        strategy = %self.config.execution()
    ))]
    fn compute(&self) -> Result<ResultSet> {
        let bands = self.bands()?;
        let zones = self.zones();
        debug!(bands = ?bands, zones = zones.len(), "starting zonal pass");

        let walker = BandWalker {
            config: &self.config,
            source: self.source,
            zones: self.zones,
            roi: self.roi,
            transform: self.transform,
        };
        let per_band = walker.run(&bands, &zones, self.parallel(bands.len()))?;

        let mut merged = ZonalAccumulator::new(self.config.clone())?;
        for acc in per_band {
            merged.merge(acc)?;
        }
        let results = merged.results();
        debug!(results = results.len(), "zonal pass finished");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{AffineTransform, GridSource, RectRegion, ZoneGrid};
    use zonal_core::Statistic;

    fn sum_config() -> ZonalConfig {
        ZonalConfig::builder().statistic(Statistic::Sum).build().unwrap()
    }

    #[test]
    fn test_implicit_zone_zero() {
        let data = GridSource::new(2, 1).with_band(vec![1.0, 2.0]).unwrap();
        let stats = ZonalStats::new(sum_config(), &data).unwrap();
        let results = stats.results().unwrap();
        assert_eq!(results.zones(), vec![0]);
        assert_eq!(results.values(), vec![3.0]);
    }

    #[test]
    fn test_roi_limits_pixels() {
        let data = GridSource::new(2, 2).with_band(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let roi = RectRegion { min_x: 0.0, min_y: 0.0, max_x: 1.0, max_y: 2.0 };
        let stats = ZonalStats::new(sum_config(), &data).unwrap().with_roi(&roi);
        assert_eq!(stats.results().unwrap().values(), vec![4.0]);
    }

    #[test]
    fn test_transform_maps_to_coarser_zones() {
        // 4x1 data over a 2x1 zone grid
        let data = GridSource::new(4, 1).with_band(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let zones = ZoneGrid::new(2, 1, vec![10, 20]).unwrap();
        let half = AffineTransform::scale(0.5, 1.0);
        let stats = ZonalStats::new(sum_config(), &data)
            .unwrap()
            .with_zones(&zones)
            .with_transform(&half);
        let results = stats.results().unwrap();
        assert_eq!(results.zone(10).values(), vec![3.0]);
        assert_eq!(results.zone(20).values(), vec![7.0]);
    }

    #[test]
    fn test_unknown_band_is_config_error() {
        let data = GridSource::new(1, 1).with_band(vec![1.0]).unwrap();
        let config = ZonalConfig::builder()
            .statistic(Statistic::Sum)
            .band(3)
            .build()
            .unwrap();
        let stats = ZonalStats::new(config, &data).unwrap();
        assert!(matches!(stats.results(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_repeated_bands_processed_once() {
        let data = GridSource::new(1, 1)
            .with_band(vec![1.0])
            .unwrap()
            .with_band(vec![2.0])
            .unwrap();
        let config = ZonalConfig::from_json(r#"{"statistics": ["sum"], "bands": [1, 0, 1]}"#).unwrap();
        let stats = ZonalStats::new(config, &data).unwrap();
        assert_eq!(stats.bands().unwrap(), vec![1, 0]);
        let results = stats.results().unwrap();
        assert_eq!(results.bands(), vec![0, 1]);
        assert_eq!(results.band(1).values(), vec![2.0]);
    }

    #[test]
    fn test_nan_nodata_value_over_grid() {
        let data = GridSource::new(2, 1).with_band(vec![f64::NAN, 3.0]).unwrap();
        let config = ZonalConfig::builder()
            .statistic(Statistic::Sum)
            .nodata_value(f64::NAN)
            .build()
            .unwrap();
        let results = ZonalStats::new(config, &data).unwrap().results().unwrap();
        let record = results.first().unwrap();
        assert_eq!(record.value, 3.0);
        assert_eq!(record.num_accepted, 1);
        assert_eq!(record.num_nan, 1);
    }

    #[test]
    fn test_results_are_memoised() {
        let data = GridSource::new(1, 1).with_band(vec![5.0]).unwrap();
        let stats = ZonalStats::new(sum_config(), &data).unwrap();
        let first = stats.results().unwrap();
        let second = stats.results().unwrap();
        assert_eq!(first.to_vec(), second.to_vec());
        assert!(stats.results.get().is_some());
    }
}
