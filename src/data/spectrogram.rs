//! Sliding-window spectral estimation over a binned light curve.
//!
//! Slides a fixed-width window across the series, hands each slice to the
//! injected spectral estimator, and assembles the per-window spectra into
//! a time-ordered spectrogram together with a windowed-mean trace and a
//! dominant-frequency trace.

use serde::{Deserialize, Serialize};

use crate::data::series::TimeSeries;
use crate::error::{Error, Result};
use crate::estimator::SpectralEstimator;
use crate::progress::{Progress, ProgressSink};

/// Lag used when pairing the mean trace against the dominant-frequency
/// trace. `Auto` means the configured window duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Lag {
    Auto,
    Seconds(f64),
}

/// Completed spectrogram: per-window spectra plus the derived traces.
///
/// Shape invariant: the matrix is `len(frequency_axis)` rows by
/// `len(time_axis)` columns, and both traces are aligned with
/// `time_axis`.
#[derive(Debug, Clone)]
pub struct SpectrogramResult {
    // Window-major storage: one spectrum per window.
    columns: Vec<Vec<f64>>,
    time_axis: Vec<f64>,
    frequency_axis: Vec<f64>,
    mean_trace: Vec<f64>,
    peak_frequency_trace: Vec<f64>,
}

impl SpectrogramResult {
    /// `(frequency bins, windows)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.frequency_axis.len(), self.time_axis.len())
    }

    /// Spectrogram value at `[frequency_bin, window_index]`.
    pub fn value(&self, frequency_bin: usize, window_index: usize) -> f64 {
        self.columns[window_index][frequency_bin]
    }

    /// The spectrum of a single window.
    pub fn column(&self, window_index: usize) -> &[f64] {
        &self.columns[window_index]
    }

    /// Start timestamp of each window.
    pub fn time_axis(&self) -> &[f64] {
        &self.time_axis
    }

    /// Frequency scan array shared by all windows.
    pub fn frequency_axis(&self) -> &[f64] {
        &self.frequency_axis
    }

    /// Arithmetic mean of the signal within each window.
    pub fn mean_trace(&self) -> &[f64] {
        &self.mean_trace
    }

    /// Frequency at which each window's spectrum attains its maximum.
    pub fn peak_frequency_trace(&self) -> &[f64] {
        &self.peak_frequency_trace
    }

    /// Pair the mean trace against the dominant-frequency trace with an
    /// offset of `lag_windows` windows.
    ///
    /// Positive lag shifts the frequency trace backward relative to the
    /// mean trace, so each mean value is paired with the frequency
    /// observed `lag_windows` windows earlier. Negative lag shifts the
    /// other way; zero returns both traces unshifted and full-length.
    /// Pure slicing: no spectra are recomputed.
    pub fn lagged_pairing(&self, lag_windows: i64) -> Result<(Vec<f64>, Vec<f64>)> {
        let n = self.time_axis.len();
        let k = lag_windows.unsigned_abs() as usize;
        if k >= n {
            return Err(Error::InvalidParameter(format!(
                "lag of {lag_windows} windows exceeds trace length {n}"
            )));
        }
        let (means, freqs) = if lag_windows >= 0 {
            (&self.mean_trace[k..], &self.peak_frequency_trace[..n - k])
        } else {
            (&self.mean_trace[..n - k], &self.peak_frequency_trace[k..])
        };
        Ok((means.to_vec(), freqs.to_vec()))
    }
}

/// Sliding-window spectrogram scanner.
///
/// The spectral estimator is injected at construction; the scanner never
/// reaches out to any ambient routine. Configuration setters only update
/// derived sizes — results are produced exclusively by [`compute`].
///
/// [`compute`]: SlidingSpectrogram::compute
pub struct SlidingSpectrogram<E> {
    series: TimeSeries,
    estimator: E,
    window_size: usize,
    step_size: usize,
    frequencies: Vec<f64>,
    scale: f64,
    progress: Option<ProgressSink>,
    result: Option<SpectrogramResult>,
}

impl<E: SpectralEstimator> SlidingSpectrogram<E> {
    /// Create a scanner with a one-sample window and step and an empty
    /// frequency scan; callers configure all three before computing.
    pub fn new(series: TimeSeries, estimator: E) -> Self {
        Self {
            series,
            estimator,
            window_size: 1,
            step_size: 1,
            frequencies: Vec::new(),
            scale: 1.0,
            progress: None,
            result: None,
        }
    }

    /// Set the window length from a duration in the series' time units,
    /// rounded toward zero to a whole number of samples.
    pub fn set_window(&mut self, duration: f64) -> Result<()> {
        self.window_size = self.duration_to_samples(duration, "window")?;
        self.result = None;
        Ok(())
    }

    /// Set the advance between consecutive windows from a duration,
    /// rounded toward zero to a whole number of samples.
    pub fn set_step(&mut self, duration: f64) -> Result<()> {
        self.step_size = self.duration_to_samples(duration, "step")?;
        self.result = None;
        Ok(())
    }

    fn duration_to_samples(&self, duration: f64, what: &str) -> Result<usize> {
        let samples = (duration / self.series.time_binning()).trunc();
        if !(samples >= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "{what} duration {duration} is shorter than one time bin"
            )));
        }
        Ok(samples as usize)
    }

    /// Regenerate the frequency scan array over `[low, high]` with the
    /// given spacing.
    pub fn set_frequency_range(&mut self, low: f64, high: f64, step: f64) -> Result<()> {
        if !(step > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "frequency step must be positive, got {step}"
            )));
        }
        if !(high > low) {
            return Err(Error::InvalidParameter(format!(
                "frequency range [{low}, {high}] is empty"
            )));
        }
        let mut freqs = Vec::new();
        let mut i = 0usize;
        loop {
            let f = low + i as f64 * step;
            if f > high {
                break;
            }
            freqs.push(f);
            i += 1;
        }
        self.frequencies = freqs;
        self.result = None;
        Ok(())
    }

    /// Display divisor applied to every spectrum value. Cosmetic only; it
    /// rescales the colormap range, not the physics.
    pub fn set_scale(&mut self, divisor: f64) -> Result<()> {
        if !(divisor > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "scale divisor must be positive, got {divisor}"
            )));
        }
        self.scale = divisor;
        self.result = None;
        Ok(())
    }

    /// Install a progress sink; `compute()` reports through it at roughly
    /// 10% completion increments.
    pub fn set_progress_sink(&mut self, sink: ProgressSink) {
        self.progress = Some(sink);
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn step_size(&self) -> usize {
        self.step_size
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Scan the series and assemble the spectrogram.
    ///
    /// Windows start at `0, step, 2*step, ...`; a trailing window that
    /// would run past the end is dropped, not zero-padded. An estimator
    /// failure aborts the whole call and leaves no partial result behind.
    pub fn compute(&mut self) -> Result<&SpectrogramResult> {
        let n = self.series.len();
        if self.window_size > n {
            return Err(Error::InsufficientData(format!(
                "window of {} samples does not fit a series of {n}",
                self.window_size
            )));
        }
        if self.frequencies.is_empty() {
            return Err(Error::InvalidParameter(
                "frequency range has not been configured".into(),
            ));
        }
        self.result = None;

        let total_windows = (n - self.window_size) / self.step_size + 1;
        let times = self.series.times();
        let values = self.series.values();
        let errors = self.series.errors();

        let mut columns = Vec::with_capacity(total_windows);
        let mut time_axis = Vec::with_capacity(total_windows);
        let mut mean_trace = Vec::with_capacity(total_windows);
        let mut peak_frequency_trace = Vec::with_capacity(total_windows);
        let mut last_decile = 0usize;

        let mut start = 0usize;
        while start + self.window_size <= n {
            let end = start + self.window_size;
            let spectrum = self
                .estimator
                .estimate(
                    &times[start..end],
                    &values[start..end],
                    &errors[start..end],
                    &self.frequencies,
                )
                .map_err(Error::Estimator)?;
            if spectrum.len() != self.frequencies.len() {
                return Err(Error::Estimator(
                    format!(
                        "estimator returned {} values for {} frequencies",
                        spectrum.len(),
                        self.frequencies.len()
                    )
                    .into(),
                ));
            }

            let mean = values[start..end].iter().sum::<f64>() / self.window_size as f64;
            let peak_bin = spectrum
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap_or(0);

            columns.push(spectrum.iter().map(|p| p / self.scale).collect());
            time_axis.push(times[start]);
            mean_trace.push(mean);
            peak_frequency_trace.push(self.frequencies[peak_bin]);

            if let Some(sink) = self.progress.as_mut() {
                let done = columns.len();
                let decile = done * 10 / total_windows;
                if decile > last_decile || done == total_windows {
                    last_decile = decile;
                    sink(Progress {
                        done,
                        total: total_windows,
                    });
                }
            }
            start += self.step_size;
        }

        Ok(self.result.insert(SpectrogramResult {
            columns,
            time_axis,
            frequency_axis: self.frequencies.clone(),
            mean_trace,
            peak_frequency_trace,
        }))
    }

    /// The computed spectrogram, or `None` before `compute()` or after a
    /// setter invalidated it.
    pub fn result(&self) -> Option<&SpectrogramResult> {
        self.result.as_ref()
    }

    /// Convert a lag to whole windows and pair the traces of the computed
    /// result. `Lag::Auto` uses the configured window duration.
    pub fn lagged_pairing(&self, lag: Lag) -> Result<(Vec<f64>, Vec<f64>)> {
        let result = self.result.as_ref().ok_or_else(|| {
            Error::InvalidParameter("spectrogram has not been computed".into())
        })?;
        let binning = self.series.time_binning();
        let seconds = match lag {
            Lag::Auto => self.window_size as f64 * binning,
            Lag::Seconds(s) => s,
        };
        let lag_windows = (seconds / (binning * self.step_size as f64)).round() as i64;
        result.lagged_pairing(lag_windows)
    }
}
