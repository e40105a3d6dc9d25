//! Error taxonomy shared across the analysis components.
//!
//! Every failure is raised at the point of detection and never retried
//! internally; callers decide whether to re-run with adjusted parameters.
//! The one deliberately silent policy — dropping out-of-domain points
//! during density binning — is not an error (see `data::density`).

use thiserror::Error;

use crate::data::axis::Axis;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error type accepted from external spectral estimators.
pub type EstimatorError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed configuration: non-positive resolution, inverted domain,
    /// out-of-range percentile, oversized lag, mismatched series lengths.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A zero-span axis would make the bin arithmetic divide by zero.
    #[error("degenerate domain: {axis} axis has zero span")]
    DegenerateDomain { axis: Axis },

    /// The input is too short for the requested operation, e.g. a window
    /// larger than the whole time series.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// An empty series where at least one sample is required.
    #[error("empty input series")]
    EmptyInput,

    /// The external spectral estimator failed; the concrete error is
    /// surfaced unchanged. No partial spectrogram is exposed.
    #[error("spectral estimator failed")]
    Estimator(#[source] EstimatorError),
}
