//! astroplot crate root: re-exports and module wiring.
//!
//! Numerical analysis pipeline behind exploratory visualization of
//! bivariate astronomical time-series data:
//! - `data::density`: 2D point-density binning over a rectangular domain
//! - `data::spectrogram`: sliding-window spectral estimation with derived
//!   mean and dominant-frequency traces
//! - `data::stats`: percentile cut lines, histogram binning, correlation
//! - `estimator`: the injected spectral-estimation collaborator
//! - `render`: the chart renderer collaborator contract
//!
//! All computation is synchronous and deterministic; rendering and
//! estimation are dependency-injected collaborators.

pub mod data;
pub mod error;
pub mod estimator;
pub mod progress;
pub mod render;

// Public re-exports for a compact external API
pub use data::axis::{Axis, AxisDomain, ClampPolicy, GridSizing};
pub use data::density::{DensityGrid, DensityMap};
pub use data::series::{PointSeries, TimeSeries};
pub use data::spectrogram::{Lag, SlidingSpectrogram, SpectrogramResult};
pub use data::stats::{histogram, pearson, RangeLimits};
pub use error::{Error, EstimatorError, Result};
pub use estimator::{LombScargle, SpectralEstimator};
pub use progress::{log_sink, Progress, ProgressSink};
pub use render::{
    AsciiRenderer, ChartRenderer, Colormap, DensityFigure, HistogramFigure, SpectrogramFigure,
};

#[cfg(feature = "fft")]
pub use estimator::{FftEstimator, FftWindow};
