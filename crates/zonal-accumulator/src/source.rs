//! Interfaces to the grid data that feeds an accumulation
//!
//! Reading rasters is outside this crate; callers adapt their data to these
//! traits. Pixel `(col, row)` of a sample source has its centre at
//! `(col + 0.5, row + 0.5)` in data space, which is the point tested against
//! the region of interest and mapped into zone space.
//!
//! [`GridSource`] and [`ZoneGrid`] are small in-memory implementations.

use std::collections::BTreeSet;
use zonal_core::{Error, Result};

/// A multi-band grid of samples
pub trait SampleSource: Sync {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn band_count(&self) -> usize;

    /// Sample at a pixel, `None` when missing
    fn sample(&self, band: usize, col: usize, row: usize) -> Option<f64>;
}

/// A grid of integer zone labels
pub trait ZoneSource: Sync {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Label at a cell, `None` when unlabelled
    fn zone(&self, col: usize, row: usize) -> Option<i32>;

    /// Label of the cell containing a zone-space point
    fn zone_at(&self, x: f64, y: f64) -> Option<i32> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let (col, row) = (x.floor() as usize, y.floor() as usize);
        if col >= self.width() || row >= self.height() {
            return None;
        }
        self.zone(col, row)
    }

    /// Every label present, found by scanning the whole grid
    fn distinct_zones(&self) -> BTreeSet<i32> {
        let mut zones = BTreeSet::new();
        for row in 0..self.height() {
            for col in 0..self.width() {
                if let Some(zone) = self.zone(col, row) {
                    zones.insert(zone);
                }
            }
        }
        zones
    }
}

/// Restricts which pixels are sampled
pub trait RegionOfInterest: Sync {
    /// Whether a data-space point lies inside the region
    fn contains(&self, x: f64, y: f64) -> bool;
}

/// Maps data-space coordinates to zone-space coordinates
pub trait CoordinateTransform: Sync {
    fn to_zone_space(&self, x: f64, y: f64) -> (f64, f64);
}

/// Data and zone grids share the same pixel grid
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl CoordinateTransform for IdentityTransform {
    fn to_zone_space(&self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }
}

/// Axis-aligned scale and offset: `zone = data * scale + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl AffineTransform {
    pub fn scale(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }
}

impl CoordinateTransform for AffineTransform {
    fn to_zone_space(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale_x + self.offset_x, y * self.scale_y + self.offset_y)
    }
}

/// Axis-aligned rectangle in data space, `[min_x, max_x) x [min_y, max_y)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectRegion {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl RegionOfInterest for RectRegion {
    fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}

/// Region defined by a predicate
pub struct FnRegion<F>(pub F);

impl<F: Fn(f64, f64) -> bool + Sync> RegionOfInterest for FnRegion<F> {
    fn contains(&self, x: f64, y: f64) -> bool {
        (self.0)(x, y)
    }
}

fn check_cells(width: usize, height: usize, len: usize, what: &str) -> Result<()> {
    let cells = width.checked_mul(height).ok_or_else(|| {
        Error::InvalidParameter(format!("{what} of {width} x {height} cells is too large"))
    })?;
    if cells != len {
        return Err(Error::InvalidParameter(format!(
            "{what} has {len} cells, expected {width} x {height} = {cells}"
        )));
    }
    Ok(())
}

/// In-memory row-major sample grid
#[derive(Debug, Clone)]
pub struct GridSource {
    width: usize,
    height: usize,
    bands: Vec<Vec<Option<f64>>>,
}

impl GridSource {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bands: Vec::new(),
        }
    }

    /// Append a band of row-major values
    pub fn with_band(self, values: Vec<f64>) -> Result<Self> {
        self.with_sparse_band(values.into_iter().map(Some).collect())
    }

    /// Append a band of row-major values with missing cells
    pub fn with_sparse_band(mut self, values: Vec<Option<f64>>) -> Result<Self> {
        check_cells(self.width, self.height, values.len(), "band")?;
        self.bands.push(values);
        Ok(self)
    }
}

impl SampleSource for GridSource {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn sample(&self, band: usize, col: usize, row: usize) -> Option<f64> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.bands
            .get(band)
            .and_then(|cells| cells[row * self.width + col])
    }
}

/// In-memory row-major zone grid
#[derive(Debug, Clone)]
pub struct ZoneGrid {
    width: usize,
    height: usize,
    labels: Vec<Option<i32>>,
}

impl ZoneGrid {
    pub fn new(width: usize, height: usize, labels: Vec<i32>) -> Result<Self> {
        Self::sparse(width, height, labels.into_iter().map(Some).collect())
    }

    /// Zone grid with unlabelled cells
    pub fn sparse(width: usize, height: usize, labels: Vec<Option<i32>>) -> Result<Self> {
        check_cells(width, height, labels.len(), "zone grid")?;
        Ok(Self {
            width,
            height,
            labels,
        })
    }
}

impl ZoneSource for ZoneGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn zone(&self, col: usize, row: usize) -> Option<i32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.labels[row * self.width + col]
    }
}
