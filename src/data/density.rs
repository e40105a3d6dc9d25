//! 2D point-density binning over a rectangular domain.

use crate::data::axis::{
    resolution_range, Axis, AxisDomain, ClampPolicy, GridSizing,
};
use crate::data::series::PointSeries;
use crate::error::{Error, Result};

/// Default fraction of the axis span used as a density bin width.
pub const DEFAULT_DENSITY_RESOLUTION: f64 = 0.01;

/// A square matrix of occupancy counts, indexed `[row = y-bin, col = x-bin]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityGrid {
    cells: Vec<u32>,
    width: usize,
}

impl DensityGrid {
    fn zeros(width: usize) -> Self {
        Self {
            cells: vec![0; width * width],
            width,
        }
    }

    /// Grid dimension (bins per axis).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Count in the cell at `(y_bin, x_bin)`.
    pub fn count(&self, y_bin: usize, x_bin: usize) -> u32 {
        self.cells[y_bin * self.width + x_bin]
    }

    /// Row-major cell counts.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Total number of binned points. Points outside the domain are never
    /// counted, so this is at most the input series length.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| c as u64).sum()
    }

    fn increment(&mut self, y_bin: usize, x_bin: usize) {
        self.cells[y_bin * self.width + x_bin] += 1;
    }
}

/// Bins a point series into a fixed-resolution occupancy grid.
///
/// Lifecycle is an explicit two-state machine: setters configure and
/// invalidate, `compute()` produces the grid, and `grid()` yields it only
/// once computed. Rendering never triggers computation implicitly.
pub struct DensityMap {
    series: PointSeries,
    x_domain: AxisDomain,
    y_domain: AxisDomain,
    resolution: f64,
    sizing: GridSizing,
    x_range: Vec<f64>,
    y_range: Vec<f64>,
    grid: Option<DensityGrid>,
}

impl DensityMap {
    /// Create a density map over the data extrema, with the given clamp
    /// policy applied to negative lower bounds and the default resolution.
    pub fn new(series: PointSeries, clamp: ClampPolicy, sizing: GridSizing) -> Result<Self> {
        let x_domain = AxisDomain::from_extrema(series.xs(), clamp)?;
        let y_domain = AxisDomain::from_extrema(series.ys(), clamp)?;
        let resolution = DEFAULT_DENSITY_RESOLUTION;
        Ok(Self {
            x_range: resolution_range(&x_domain, resolution),
            y_range: resolution_range(&y_domain, resolution),
            series,
            x_domain,
            y_domain,
            resolution,
            sizing,
            grid: None,
        })
    }

    /// Update the bin resolution and regenerate both axis ranges.
    pub fn set_resolution(&mut self, resolution: f64) -> Result<()> {
        if resolution <= 0.0 || resolution > 1.0 {
            return Err(Error::InvalidParameter(format!(
                "density resolution must be in (0, 1], got {resolution}"
            )));
        }
        self.resolution = resolution;
        self.x_range = resolution_range(&self.x_domain, resolution);
        self.y_range = resolution_range(&self.y_domain, resolution);
        self.grid = None;
        Ok(())
    }

    /// Replace the domain of one axis and recompute its range. Explicit
    /// domains are taken as-is; no clamping applies here.
    pub fn set_domain(&mut self, axis: Axis, lower: f64, upper: f64) -> Result<()> {
        let domain = AxisDomain::new(lower, upper)?;
        match axis {
            Axis::X => {
                self.x_domain = domain;
                self.x_range = resolution_range(&domain, self.resolution);
            }
            Axis::Y => {
                self.y_domain = domain;
                self.y_range = resolution_range(&domain, self.resolution);
            }
        }
        self.grid = None;
        Ok(())
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn sizing(&self) -> GridSizing {
        self.sizing
    }

    pub fn domain(&self, axis: Axis) -> &AxisDomain {
        match axis {
            Axis::X => &self.x_domain,
            Axis::Y => &self.y_domain,
        }
    }

    /// Axis coordinates of the bin edges, one sequence per axis.
    pub fn x_range(&self) -> &[f64] {
        &self.x_range
    }

    pub fn y_range(&self) -> &[f64] {
        &self.y_range
    }

    /// Bin every point into a fresh grid.
    ///
    /// Points outside the configured domain on either axis are silently
    /// dropped: callers are expected to have set the domain to cover
    /// their data, and malformed or extreme points must not abort the
    /// computation. A zero-span axis is a hard failure instead of a NaN
    /// grid.
    pub fn compute(&mut self) -> Result<&DensityGrid> {
        let x_span = self.x_domain.span();
        let y_span = self.y_domain.span();
        if x_span == 0.0 {
            return Err(Error::DegenerateDomain { axis: Axis::X });
        }
        if y_span == 0.0 {
            return Err(Error::DegenerateDomain { axis: Axis::Y });
        }

        let pixelwidth = self.sizing.pixelwidth(self.resolution);
        let mut grid = DensityGrid::zeros(pixelwidth);
        let scale = self.sizing.bin_scale(self.resolution) as f64;
        let pw = pixelwidth as f64;
        let mut dropped = 0usize;
        for (x, y) in self.series.iter() {
            let gx = ((x - self.x_domain.lower) * scale / x_span).floor();
            let gy = ((y - self.y_domain.lower) * scale / y_span).floor();
            if gx >= 0.0 && gx < pw && gy >= 0.0 && gy < pw {
                grid.increment(gy as usize, gx as usize);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, total = self.series.len(), "points outside domain");
        }
        Ok(self.grid.insert(grid))
    }

    /// The computed grid, or `None` before the first `compute()` call or
    /// after a setter invalidated it.
    pub fn grid(&self) -> Option<&DensityGrid> {
        self.grid.as_ref()
    }

    pub fn series(&self) -> &PointSeries {
        &self.series
    }
}
