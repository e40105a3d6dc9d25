//! Spectral estimator contract and the shipped estimators.
//!
//! The sliding-window scanner treats the estimator as an opaque,
//! injected collaborator: given one window's times, values, errors and
//! the frequency scan array, it returns one spectrum of the same length
//! as the frequency array, without mutating its inputs. It may fail for
//! degenerate windows; such failures abort the whole scan.

use thiserror::Error;

use crate::error::EstimatorError;

/// One spectrum per window, evaluated on the caller's frequency grid.
pub trait SpectralEstimator {
    fn estimate(
        &self,
        times: &[f64],
        values: &[f64],
        errors: &[f64],
        frequencies: &[f64],
    ) -> std::result::Result<Vec<f64>, EstimatorError>;
}

/// Plain functions and closures are estimators.
impl<F> SpectralEstimator for F
where
    F: Fn(&[f64], &[f64], &[f64], &[f64]) -> std::result::Result<Vec<f64>, EstimatorError>,
{
    fn estimate(
        &self,
        times: &[f64],
        values: &[f64],
        errors: &[f64],
        frequencies: &[f64],
    ) -> std::result::Result<Vec<f64>, EstimatorError> {
        self(times, values, errors, frequencies)
    }
}

#[derive(Debug, Error)]
pub enum LombScargleError {
    #[error("non-positive measurement error at sample {index}")]
    BadMeasurementError { index: usize },
    #[error("window signal is constant; periodogram undefined")]
    ConstantWindow,
    #[error("singular normal equations at frequency {frequency}")]
    Singular { frequency: f64 },
}

/// Error-weighted generalized Lomb–Scargle periodogram
/// (floating-mean formulation), suitable for unevenly sampled windows.
///
/// Power is normalized to `[0, 1]` by the weighted variance of the
/// window.
#[derive(Debug, Clone, Copy, Default)]
pub struct LombScargle;

impl SpectralEstimator for LombScargle {
    fn estimate(
        &self,
        times: &[f64],
        values: &[f64],
        errors: &[f64],
        frequencies: &[f64],
    ) -> std::result::Result<Vec<f64>, EstimatorError> {
        let n = times.len();

        // Normalized statistical weights from the measurement errors.
        let mut weights = Vec::with_capacity(n);
        let mut w_sum = 0.0;
        for (index, &e) in errors.iter().enumerate() {
            if !(e > 0.0) {
                return Err(LombScargleError::BadMeasurementError { index }.into());
            }
            let w = 1.0 / (e * e);
            weights.push(w);
            w_sum += w;
        }
        for w in &mut weights {
            *w /= w_sum;
        }

        // Weighted mean and variance of the window.
        let y_mean: f64 = weights.iter().zip(values).map(|(w, y)| w * y).sum();
        let yy: f64 = weights
            .iter()
            .zip(values)
            .map(|(w, y)| w * (y - y_mean) * (y - y_mean))
            .sum();
        if yy == 0.0 {
            return Err(LombScargleError::ConstantWindow.into());
        }

        let mut power = Vec::with_capacity(frequencies.len());
        for &f in frequencies {
            let omega = 2.0 * std::f64::consts::PI * f;
            let mut c = 0.0;
            let mut s = 0.0;
            let mut yc = 0.0;
            let mut ys = 0.0;
            let mut cc = 0.0;
            let mut ss = 0.0;
            let mut cs = 0.0;
            for i in 0..n {
                let w = weights[i];
                let (sin, cos) = (omega * times[i]).sin_cos();
                let dy = values[i] - y_mean;
                c += w * cos;
                s += w * sin;
                yc += w * dy * cos;
                ys += w * dy * sin;
                cc += w * cos * cos;
                ss += w * sin * sin;
                cs += w * cos * sin;
            }
            // Center the trigonometric sums (floating mean).
            let cc_c = cc - c * c;
            let ss_c = ss - s * s;
            let cs_c = cs - c * s;
            let d = cc_c * ss_c - cs_c * cs_c;
            if d == 0.0 {
                return Err(LombScargleError::Singular { frequency: f }.into());
            }
            let p = (ss_c * yc * yc + cc_c * ys * ys - 2.0 * cs_c * yc * ys) / (yy * d);
            power.push(p);
        }
        Ok(power)
    }
}

#[cfg(feature = "fft")]
pub use self::fft::{FftEstimator, FftEstimatorError, FftWindow};

#[cfg(feature = "fft")]
mod fft {
    use super::SpectralEstimator;
    use crate::error::EstimatorError;
    use rustfft::{num_complex::Complex, FftPlanner};
    use thiserror::Error;

    /// Supported FFT window functions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum FftWindow {
        /// Rectangular (no windowing)
        Rect,
        #[default]
        Hann,
        Hamming,
        Blackman,
    }

    impl FftWindow {
        /// Window weight for sample `n` of `len`.
        pub fn weight(&self, n: usize, len: usize) -> f64 {
            let x = 2.0 * std::f64::consts::PI * n as f64 / len as f64;
            match self {
                FftWindow::Rect => 1.0,
                FftWindow::Hann => 0.5 - 0.5 * x.cos(),
                FftWindow::Hamming => 0.54 - 0.46 * x.cos(),
                FftWindow::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
            }
        }
    }

    #[derive(Debug, Error)]
    pub enum FftEstimatorError {
        #[error("window of {len} samples is too short for an FFT")]
        WindowTooShort { len: usize },
        #[error("window time axis is not increasing")]
        NonIncreasingTimes,
    }

    /// FFT-based magnitude spectrum, linearly interpolated onto the
    /// requested frequency grid (zero outside `[0, nyquist]`).
    ///
    /// Assumes the window is uniformly sampled; the sample rate is taken
    /// from the window's own time axis. Measurement errors are ignored.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FftEstimator {
        pub window: FftWindow,
    }

    impl SpectralEstimator for FftEstimator {
        fn estimate(
            &self,
            times: &[f64],
            values: &[f64],
            _errors: &[f64],
            frequencies: &[f64],
        ) -> std::result::Result<Vec<f64>, EstimatorError> {
            let len = times.len();
            if len < 2 {
                return Err(FftEstimatorError::WindowTooShort { len }.into());
            }
            let t0 = times[0];
            let t1 = times[len - 1];
            if !(t1 > t0) {
                return Err(FftEstimatorError::NonIncreasingTimes.into());
            }
            let dt = (t1 - t0) / (len as f64 - 1.0);
            let sample_rate = 1.0 / dt;

            let mut data: Vec<Complex<f64>> = values
                .iter()
                .enumerate()
                .map(|(i, &v)| Complex {
                    re: v * self.window.weight(i, len),
                    im: 0.0,
                })
                .collect();
            let mut planner = FftPlanner::new();
            planner.plan_fft_forward(len).process(&mut data);

            // One-sided magnitude spectrum up to Nyquist.
            let half = len / 2;
            let scale = 2.0 / len as f64;
            let bin_hz = sample_rate / len as f64;
            let mags: Vec<f64> = data.iter().take(half + 1).map(|c| c.norm() * scale).collect();

            // Resample onto the caller's grid.
            let nyquist = sample_rate / 2.0;
            let out = frequencies
                .iter()
                .map(|&f| {
                    if f < 0.0 || f > nyquist {
                        return 0.0;
                    }
                    let pos = f / bin_hz;
                    let k = pos.floor() as usize;
                    if k + 1 >= mags.len() {
                        return mags[mags.len() - 1];
                    }
                    let frac = pos - k as f64;
                    mags[k] * (1.0 - frac) + mags[k + 1] * frac
                })
                .collect();
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_series(freq: f64, n: usize, dt: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let times: Vec<f64> = (0..n).map(|i| i as f64 * dt).collect();
        let values: Vec<f64> = times
            .iter()
            .map(|t| (2.0 * std::f64::consts::PI * freq * t).sin())
            .collect();
        let errors = vec![0.1; n];
        (times, values, errors)
    }

    #[test]
    fn lomb_scargle_peaks_at_signal_frequency() {
        let true_freq = 0.05;
        let (times, values, errors) = sine_series(true_freq, 400, 1.0);
        let frequencies: Vec<f64> = (1..100).map(|i| i as f64 * 0.001).collect();

        let power = LombScargle
            .estimate(&times, &values, &errors, &frequencies)
            .unwrap();
        assert_eq!(power.len(), frequencies.len());

        let peak = power
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| frequencies[i])
            .unwrap();
        assert!(
            (peak - true_freq).abs() < 0.002,
            "peak at {peak}, expected {true_freq}"
        );
    }

    #[test]
    fn lomb_scargle_rejects_bad_errors() {
        let (times, values, mut errors) = sine_series(0.05, 50, 1.0);
        errors[7] = 0.0;
        let frequencies = vec![0.01, 0.02];
        let err = LombScargle
            .estimate(&times, &values, &errors, &frequencies)
            .unwrap_err();
        assert!(err.to_string().contains("sample 7"));
    }

    #[test]
    fn lomb_scargle_rejects_constant_window() {
        let times: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let values = vec![3.0; 50];
        let errors = vec![0.1; 50];
        let err = LombScargle
            .estimate(&times, &values, &errors, &[0.01, 0.02])
            .unwrap_err();
        assert!(err.to_string().contains("constant"));
    }

    #[cfg(feature = "fft")]
    #[test]
    fn fft_estimator_peaks_at_signal_frequency() {
        let true_freq = 0.05;
        let (times, values, errors) = sine_series(true_freq, 256, 1.0);
        let frequencies: Vec<f64> = (1..100).map(|i| i as f64 * 0.001).collect();

        let power = FftEstimator::default()
            .estimate(&times, &values, &errors, &frequencies)
            .unwrap();
        let peak = power
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| frequencies[i])
            .unwrap();
        assert!(
            (peak - true_freq).abs() < 0.005,
            "peak at {peak}, expected {true_freq}"
        );
    }
}
