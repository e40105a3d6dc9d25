//! Axis domains, clamping policy and resolution-derived coordinate ranges.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifies one of the two plot axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Policy for domains derived from data extrema.
///
/// Quantities like intensities or frequencies are non-negative by nature,
/// so a domain derived from noisy data may be pulled below zero by a few
/// outliers. `NonNegative` clamps such a lower bound to zero. Explicit
/// `set_domain` calls are never clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClampPolicy {
    /// Keep the raw extrema.
    #[default]
    Keep,
    /// Clamp a negative lower bound to zero.
    NonNegative,
}

/// Grid sizing convention for the density map.
///
/// Both conventions exist in the field; which one is in use changes where
/// a point sitting exactly on the upper domain bound lands, so the choice
/// is explicit rather than baked in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridSizing {
    /// `pixelwidth = floor(1 / resolution)`. A point exactly on the upper
    /// bound maps to index `pixelwidth` and is dropped.
    #[default]
    Exclusive,
    /// `pixelwidth = floor(1 / resolution) + 1`: one extra bin past the
    /// nominal grid. Bin widths are unchanged, so the upper bound lands
    /// in the extra last bin instead of being dropped.
    Inclusive,
}

impl GridSizing {
    /// Number of bins per axis for the given resolution.
    pub fn pixelwidth(&self, resolution: f64) -> usize {
        match self {
            GridSizing::Exclusive => self.bin_scale(resolution),
            GridSizing::Inclusive => self.bin_scale(resolution) + 1,
        }
    }

    /// Bins per axis span; the scaling factor of the index arithmetic.
    /// Identical for both conventions — `Inclusive` only widens the
    /// accepted index range.
    pub fn bin_scale(&self, resolution: f64) -> usize {
        (1.0 / resolution) as usize
    }
}

/// Inclusive lower / upper bound pair for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub lower: f64,
    pub upper: f64,
}

impl AxisDomain {
    /// Create a domain, rejecting inverted bounds.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if upper < lower {
            return Err(Error::InvalidParameter(format!(
                "domain upper bound {upper} is below lower bound {lower}"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Domain spanning the extrema of `values`, with the clamp policy
    /// applied to a negative lower bound.
    pub fn from_extrema(values: &[f64], clamp: ClampPolicy) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut lower = f64::INFINITY;
        let mut upper = f64::NEG_INFINITY;
        for &v in values {
            lower = lower.min(v);
            upper = upper.max(v);
        }
        if clamp == ClampPolicy::NonNegative && lower < 0.0 {
            lower = 0.0;
            upper = upper.max(0.0);
        }
        Self::new(lower, upper)
    }

    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Axis coordinates from `lower` to `upper` in steps of
/// `resolution * span`.
///
/// The stop value carries a `0.1 * resolution * span` overshoot: it forces
/// the range to include the upper bound despite floating-point rounding in
/// the step accumulation, while the 0.1 factor keeps it from running a
/// further full step past it.
pub fn resolution_range(domain: &AxisDomain, resolution: f64) -> Vec<f64> {
    let span = domain.span();
    let step = resolution * span;
    if step <= 0.0 {
        return vec![domain.lower];
    }
    let stop = domain.upper + 0.1 * step;
    let mut out = Vec::with_capacity((1.0 / resolution) as usize + 2);
    let mut i = 0usize;
    loop {
        let v = domain.lower + i as f64 * step;
        if v >= stop {
            break;
        }
        out.push(v);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_includes_upper_with_bounded_overshoot() {
        for &res in &[0.01, 0.02, 0.05, 0.1, 0.25] {
            let domain = AxisDomain::new(0.3, 7.7).unwrap();
            let range = resolution_range(&domain, res);
            let step = res * domain.span();
            let last = *range.last().unwrap();
            assert!(
                last >= domain.upper - 1e-9,
                "res {res}: last {last} should reach upper {}",
                domain.upper
            );
            assert!(
                last < domain.upper + step,
                "res {res}: last {last} overshoots by a full step"
            );
        }
    }

    #[test]
    fn range_starts_at_lower() {
        let domain = AxisDomain::new(-2.0, 2.0).unwrap();
        let range = resolution_range(&domain, 0.1);
        assert_eq!(range[0], -2.0);
    }

    #[test]
    fn pixelwidth_conventions() {
        assert_eq!(GridSizing::Exclusive.pixelwidth(0.25), 4);
        assert_eq!(GridSizing::Inclusive.pixelwidth(0.25), 5);
        assert_eq!(GridSizing::Exclusive.pixelwidth(0.01), 100);
    }

    #[test]
    fn extrema_clamping() {
        let vals = [-1.5, 0.5, 3.0];
        let kept = AxisDomain::from_extrema(&vals, ClampPolicy::Keep).unwrap();
        assert_eq!(kept.lower, -1.5);
        let clamped = AxisDomain::from_extrema(&vals, ClampPolicy::NonNegative).unwrap();
        assert_eq!(clamped.lower, 0.0);
        assert_eq!(clamped.upper, 3.0);
    }

    #[test]
    fn inverted_domain_rejected() {
        assert!(matches!(
            AxisDomain::new(2.0, 1.0),
            Err(Error::InvalidParameter(_))
        ));
    }
}
