//! Result records and filtered views over them

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::sync::Arc;
use zonal_core::Statistic;
use zonal_range::Range;

// JSON has no NaN; undefined statistics travel as null
fn nan_as_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_nan() {
        serializer.serialize_none()
    } else {
        serializer.serialize_some(value)
    }
}

fn null_as_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// One statistic for one (band, zone) accumulation unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonalResult {
    pub band: usize,
    pub zone: i32,
    pub statistic: Statistic,
    /// NaN when too few samples were accepted
    #[serde(serialize_with = "nan_as_null", deserialize_with = "null_as_nan")]
    pub value: f64,
    pub num_offered: u64,
    pub num_accepted: u64,
    pub num_nan: u64,
    pub num_nodata: u64,
    /// Data ranges that filtered the samples behind this value
    pub applied_ranges: Vec<Range<f64>>,
}

/// A filtered view over a shared table of results
///
/// Filters return new views; the records themselves are never copied.
/// Views keep the order of the underlying table (band, then zone, then
/// range subset, then statistic in request order).
///
/// # Example
///
/// ```rust
/// use zonal_accumulator::{ZonalAccumulator, ZonalConfig};
/// use zonal_core::Statistic;
///
/// let config = ZonalConfig::builder().statistic(Statistic::Mean).build().unwrap();
/// let mut acc = ZonalAccumulator::new(config).unwrap();
/// acc.offer(Some(10.0), 0, 0).unwrap();
/// acc.offer(Some(20.0), 1, 0).unwrap();
///
/// let results = acc.results();
/// let zone1 = results.zone(1).statistic(Statistic::Mean);
/// assert_eq!(zone1.values(), vec![20.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ResultSet {
    records: Arc<Vec<ZonalResult>>,
    selection: Vec<usize>,
}

impl ResultSet {
    pub fn new(records: Vec<ZonalResult>) -> Self {
        let selection = (0..records.len()).collect();
        Self {
            records: Arc::new(records),
            selection,
        }
    }

    fn filter<F: Fn(&ZonalResult) -> bool>(&self, keep: F) -> Self {
        Self {
            records: Arc::clone(&self.records),
            selection: self
                .selection
                .iter()
                .copied()
                .filter(|&i| keep(&self.records[i]))
                .collect(),
        }
    }

    pub fn band(&self, band: usize) -> Self {
        self.filter(|r| r.band == band)
    }

    pub fn zone(&self, zone: i32) -> Self {
        self.filter(|r| r.zone == zone)
    }

    pub fn statistic(&self, stat: Statistic) -> Self {
        self.filter(|r| r.statistic == stat)
    }

    /// Results whose applied ranges include every one of `ranges`
    pub fn ranges(&self, ranges: &[Range<f64>]) -> Self {
        self.filter(|r| ranges.iter().all(|wanted| r.applied_ranges.contains(wanted)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZonalResult> + '_ {
        self.selection.iter().map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn first(&self) -> Option<&ZonalResult> {
        self.selection.first().map(|&i| &self.records[i])
    }

    /// Statistic values in view order
    pub fn values(&self) -> Vec<f64> {
        self.iter().map(|r| r.value).collect()
    }

    /// Distinct bands in the view, ascending
    pub fn bands(&self) -> Vec<usize> {
        self.iter()
            .map(|r| r.band)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct zones in the view, ascending
    pub fn zones(&self) -> Vec<i32> {
        self.iter()
            .map(|r| r.zone)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Owned copies of the selected records
    pub fn to_vec(&self) -> Vec<ZonalResult> {
        self.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ZonalResult;
    type IntoIter = Box<dyn Iterator<Item = &'a ZonalResult> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(band: usize, zone: i32, statistic: Statistic, value: f64, ranges: Vec<Range<f64>>) -> ZonalResult {
        ZonalResult {
            band,
            zone,
            statistic,
            value,
            num_offered: 1,
            num_accepted: 1,
            num_nan: 0,
            num_nodata: 0,
            applied_ranges: ranges,
        }
    }

    fn sample_set() -> ResultSet {
        let low = Range::closed(0.0, 1.0).unwrap();
        let high = Range::closed(2.0, 3.0).unwrap();
        ResultSet::new(vec![
            record(0, 0, Statistic::Mean, 1.0, vec![low.clone(), high.clone()]),
            record(0, 1, Statistic::Mean, 2.0, vec![low.clone()]),
            record(0, 1, Statistic::Sum, 3.0, vec![high.clone()]),
            record(1, 0, Statistic::Mean, 4.0, vec![]),
        ])
    }

    #[test]
    fn test_chained_filters() {
        let set = sample_set();
        assert_eq!(set.len(), 4);
        assert_eq!(set.band(0).zone(1).values(), vec![2.0, 3.0]);
        assert_eq!(set.band(0).statistic(Statistic::Mean).len(), 2);
        assert!(set.band(7).is_empty());
        assert_eq!(set.bands(), vec![0, 1]);
        assert_eq!(set.statistic(Statistic::Mean).zones(), vec![0, 1]);
    }

    #[test]
    fn test_ranges_filter_requires_all() {
        let set = sample_set();
        let low = Range::closed(0.0, 1.0).unwrap();
        let high = Range::closed(2.0, 3.0).unwrap();
        assert_eq!(set.ranges(&[low.clone()]).values(), vec![1.0, 2.0]);
        assert_eq!(set.ranges(&[low, high]).values(), vec![1.0]);
        assert_eq!(set.ranges(&[]).len(), 4);
    }

    #[test]
    fn test_views_share_records() {
        let set = sample_set();
        let view = set.zone(0);
        assert!(Arc::ptr_eq(&set.records, &view.records));
        assert_eq!(view.first().map(|r| r.value), Some(1.0));
        assert_eq!((&view).into_iter().count(), 2);
    }

    #[test]
    fn test_nan_serialises_as_null() {
        let r = record(0, 0, Statistic::Sdev, f64::NAN, vec![]);
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"value\":null"));
        let back: ZonalResult = serde_json::from_str(&json).unwrap();
        assert!(back.value.is_nan());
    }
}
