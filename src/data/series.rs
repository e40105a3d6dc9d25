//! Input series types: bivariate point clouds and binned light curves.

use crate::error::{Error, Result};

/// Two equal-length ordered sequences of (x, y) pairs.
///
/// Immutable once constructed; owned by the density computation that
/// consumes it.
#[derive(Debug, Clone)]
pub struct PointSeries {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl PointSeries {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.is_empty() || ys.is_empty() {
            return Err(Error::EmptyInput);
        }
        if xs.len() != ys.len() {
            return Err(Error::InvalidParameter(format!(
                "x series has {} samples but y series has {}",
                xs.len(),
                ys.len()
            )));
        }
        Ok(Self { xs, ys })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Iterate over (x, y) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// A uniformly binned light curve: timestamps, values and per-sample
/// measurement errors.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    times: Vec<f64>,
    values: Vec<f64>,
    errors: Vec<f64>,
}

impl TimeSeries {
    /// Construct a time series. Requires equal-length columns, at least
    /// two samples (the nominal sampling interval is taken from the first
    /// pair of timestamps) and strictly increasing times.
    pub fn new(times: Vec<f64>, values: Vec<f64>, errors: Vec<f64>) -> Result<Self> {
        if times.is_empty() {
            return Err(Error::EmptyInput);
        }
        if times.len() != values.len() || times.len() != errors.len() {
            return Err(Error::InvalidParameter(format!(
                "column lengths differ: {} times, {} values, {} errors",
                times.len(),
                values.len(),
                errors.len()
            )));
        }
        if times.len() < 2 {
            return Err(Error::InsufficientData(
                "a time series needs at least two samples".into(),
            ));
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::InvalidParameter(
                "timestamps must be strictly increasing".into(),
            ));
        }
        Ok(Self {
            times,
            values,
            errors,
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Nominal sampling interval, assumed uniform across the series.
    pub fn time_binning(&self) -> f64 {
        self.times[1] - self.times[0]
    }
}
