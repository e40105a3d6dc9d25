//! Percentile cut lines, histogram binning and correlation helpers.

use crate::data::axis::AxisDomain;
use crate::error::{Error, Result};

/// Percentile-based low/high cut lines over a sorted series.
///
/// The input is copied and sorted internally; the caller's buffer is left
/// untouched. Cutoffs are computed on demand and cached for the renderer
/// to overlay on a histogram.
#[derive(Debug, Clone)]
pub struct RangeLimits {
    data: Vec<f64>,
    low: Option<f64>,
    high: Option<f64>,
}

impl RangeLimits {
    pub fn new(data: &[f64]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);
        Ok(Self {
            data: sorted,
            low: None,
            high: None,
        })
    }

    fn check_percentile(p: f64) -> Result<()> {
        if !(0.0..=100.0).contains(&p) {
            return Err(Error::InvalidParameter(format!(
                "percentile {p} outside [0, 100]"
            )));
        }
        Ok(())
    }

    /// Index is clamped so p = 100 (low) and p = 0 (high) select the last
    /// element instead of running off the end.
    fn at_fraction(&self, fraction: f64) -> f64 {
        let idx = ((fraction * self.data.len() as f64 / 100.0) as usize)
            .min(self.data.len() - 1);
        self.data[idx]
    }

    /// Value at sorted position `floor(p/100 * len)`; cached as the low
    /// cutoff.
    pub fn low_percentile(&mut self, p: f64) -> Result<f64> {
        Self::check_percentile(p)?;
        let v = self.at_fraction(p);
        self.low = Some(v);
        Ok(v)
    }

    /// Value at sorted position `floor((100-p)/100 * len)`; cached as the
    /// high cutoff.
    pub fn high_percentile(&mut self, p: f64) -> Result<f64> {
        Self::check_percentile(p)?;
        let v = self.at_fraction(100.0 - p);
        self.high = Some(v);
        Ok(v)
    }

    /// Both cut lines at once.
    pub fn range(&mut self, low_p: f64, high_p: f64) -> Result<(f64, f64)> {
        Ok((self.low_percentile(low_p)?, self.high_percentile(high_p)?))
    }

    /// Shorthand for `range(p, p)`.
    pub fn symmetric_range(&mut self, p: f64) -> Result<(f64, f64)> {
        self.range(p, p)
    }

    /// The sorted series.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn low(&self) -> Option<f64> {
        self.low
    }

    pub fn high(&self) -> Option<f64> {
        self.high
    }
}

/// Bin `data` into `bins` equal-width counts over `range`. Values outside
/// the range are ignored; a value exactly on the upper bound lands in the
/// last bin.
pub fn histogram(data: &[f64], bins: usize, range: &AxisDomain) -> Result<Vec<u32>> {
    if bins == 0 {
        return Err(Error::InvalidParameter("histogram needs at least one bin".into()));
    }
    let span = range.span();
    if span <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "histogram range [{}, {}] has no width",
            range.lower, range.upper
        )));
    }
    let mut counts = vec![0u32; bins];
    for &v in data {
        if v < range.lower || v > range.upper {
            continue;
        }
        let bin = (((v - range.lower) / span * bins as f64) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    if let Some(&peak) = counts.iter().max() {
        tracing::debug!(peak, bins, "histogram binned");
    }
    Ok(counts)
}

/// Pearson linear correlation coefficient between two paired series.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(Error::InvalidParameter(format!(
            "paired series differ in length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(Error::InsufficientData(
            "correlation needs at least two pairs".into(),
        ));
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return Err(Error::InvalidParameter(
            "correlation is undefined for a constant series".into(),
        ));
    }
    Ok(cov / (var_x * var_y).sqrt())
}
