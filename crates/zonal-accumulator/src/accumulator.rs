//! Per (band, zone) accumulation units

use crate::config::ZonalConfig;
use crate::results::{ResultSet, ZonalResult};
use std::collections::BTreeMap;
use tracing::debug;
use zonal_core::{Error, Result};
use zonal_range::Range;
use zonal_streaming::StreamingSampleStats;

/// Streaming statistics restricted to one subset of the data ranges
#[derive(Debug)]
struct Unit {
    applied_ranges: Vec<Range<f64>>,
    stats: StreamingSampleStats,
}

/// Accumulates statistics separately for every (band, zone) pair
///
/// Units are created on first use or registered up front with
/// [`ZonalAccumulator::register_zones`], which makes zones without samples
/// appear in the results. In local range mode every (band, zone) pair holds
/// one unit per configured range, each filtering the full sample stream with
/// that range alone.
#[derive(Debug)]
pub struct ZonalAccumulator {
    config: ZonalConfig,
    units: BTreeMap<(usize, i32), Vec<Unit>>,
}

impl ZonalAccumulator {
    /// Create an accumulator; the configuration is validated
    pub fn new(config: ZonalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            units: BTreeMap::new(),
        })
    }

    pub fn config(&self) -> &ZonalConfig {
        &self.config
    }

    fn create_units(config: &ZonalConfig) -> Result<Vec<Unit>> {
        config
            .range_subsets()
            .into_iter()
            .map(|applied_ranges| {
                Ok(Unit {
                    stats: config.new_stats(&applied_ranges)?,
                    applied_ranges,
                })
            })
            .collect()
    }

    /// Make sure the (band, zone) pair has its units
    pub fn register(&mut self, band: usize, zone: i32) -> Result<()> {
        if !self.units.contains_key(&(band, zone)) {
            let units = Self::create_units(&self.config)?;
            debug!(band, zone, units = units.len(), "registered accumulation unit");
            self.units.insert((band, zone), units);
        }
        Ok(())
    }

    /// Register several zones for one band
    pub fn register_zones<I: IntoIterator<Item = i32>>(&mut self, band: usize, zones: I) -> Result<()> {
        zones.into_iter().try_for_each(|zone| self.register(band, zone))
    }

    /// Feed one sample (`None` for a missing value)
    pub fn offer(&mut self, sample: Option<f64>, zone: i32, band: usize) -> Result<()> {
        self.register(band, zone)?;
        if let Some(units) = self.units.get_mut(&(band, zone)) {
            for unit in units {
                unit.stats.offer(sample);
            }
        }
        Ok(())
    }

    /// Feed every value of an iterator to one (band, zone) pair
    pub fn offer_all<I: IntoIterator<Item = f64>>(&mut self, samples: I, zone: i32, band: usize) -> Result<()> {
        samples
            .into_iter()
            .try_for_each(|sample| self.offer(Some(sample), zone, band))
    }

    /// Registered (band, zone) pairs, ascending
    pub fn keys(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.units.keys().copied()
    }

    /// Streaming statistics of every unit of a (band, zone) pair
    pub fn stats(&self, band: usize, zone: i32) -> Option<Vec<&StreamingSampleStats>> {
        self.units
            .get(&(band, zone))
            .map(|units| units.iter().map(|u| &u.stats).collect())
    }

    /// Move the units of another accumulator into this one
    ///
    /// Both must have been built from the same configuration and must not
    /// share a (band, zone) pair.
    pub fn merge(&mut self, other: ZonalAccumulator) -> Result<()> {
        if other.config != self.config {
            return Err(Error::invalid_config(
                "cannot merge accumulators with different configurations",
            ));
        }
        for (key, units) in other.units {
            if self.units.contains_key(&key) {
                return Err(Error::InvalidParameter(format!(
                    "band {} zone {} accumulated twice",
                    key.0, key.1
                )));
            }
            self.units.insert(key, units);
        }
        Ok(())
    }

    /// Snapshot of every statistic of every unit
    pub fn results(&self) -> ResultSet {
        let mut records = Vec::new();
        for (&(band, zone), units) in &self.units {
            for unit in units {
                for &stat in self.config.statistics() {
                    let counts = unit.stats.counts(stat).unwrap_or_default();
                    records.push(ZonalResult {
                        band,
                        zone,
                        statistic: stat,
                        value: unit.stats.statistic(stat).unwrap_or(f64::NAN),
                        num_offered: counts.offered,
                        num_accepted: counts.accepted,
                        num_nan: counts.nan,
                        num_nodata: counts.nodata,
                        applied_ranges: unit.applied_ranges.clone(),
                    });
                }
            }
        }
        ResultSet::new(records)
    }
}
