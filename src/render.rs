//! Chart renderer contract.
//!
//! Rendering is an external collaborator: the analysis components hand
//! over borrowed figure payloads (matrices, axes, labels, colormap
//! identifiers) and the renderer produces whatever artifact it likes.
//! The crate ships a small ASCII renderer so the contract is exercised;
//! graphical backends live elsewhere.

use serde::{Deserialize, Serialize};

use crate::data::axis::AxisDomain;
use crate::data::density::DensityGrid;
use crate::data::spectrogram::SpectrogramResult;

/// Colormap identifier forwarded to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Colormap {
    /// Black-red-yellow-white heat map.
    #[default]
    AfmHot,
    Viridis,
    Plasma,
    Grayscale,
}

impl Colormap {
    pub fn as_str(&self) -> &'static str {
        match self {
            Colormap::AfmHot => "afmhot",
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Grayscale => "grayscale",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "afmhot" => Some(Colormap::AfmHot),
            "viridis" => Some(Colormap::Viridis),
            "plasma" => Some(Colormap::Plasma),
            "grayscale" | "gray" | "grey" => Some(Colormap::Grayscale),
            _ => None,
        }
    }
}

/// Density map plus the axis metadata a renderer needs for the marginal
/// histograms and extent.
pub struct DensityFigure<'a> {
    pub grid: &'a DensityGrid,
    pub x_range: &'a [f64],
    pub y_range: &'a [f64],
    pub x_domain: AxisDomain,
    pub y_domain: AxisDomain,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub colormap: Colormap,
}

/// Spectrogram plus derived traces and axis labels.
pub struct SpectrogramFigure<'a> {
    pub result: &'a SpectrogramResult,
    pub time_label: &'a str,
    pub frequency_label: &'a str,
    /// Overlay the dominant-frequency trace on the spectrogram.
    pub show_peak_trace: bool,
    pub colormap: Colormap,
}

/// Plain histogram with optional percentile cut lines.
pub struct HistogramFigure<'a> {
    pub counts: &'a [u32],
    pub range: AxisDomain,
    pub low_cut: Option<f64>,
    pub high_cut: Option<f64>,
    pub label: &'a str,
}

/// Consumes figure payloads and produces a visual artifact.
pub trait ChartRenderer {
    type Output;

    fn density(&mut self, figure: &DensityFigure<'_>) -> Self::Output;
    fn spectrogram(&mut self, figure: &SpectrogramFigure<'_>) -> Self::Output;
    fn histogram(&mut self, figure: &HistogramFigure<'_>) -> Self::Output;
}

/// Terminal renderer using unicode block characters.
pub struct AsciiRenderer {
    pub width: usize,
    pub height: usize,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self {
            width: 64,
            height: 24,
        }
    }
}

const RAMP: [char; 5] = [' ', '░', '▒', '▓', '█'];

impl AsciiRenderer {
    fn shade(value: f64, max: f64) -> char {
        if max <= 0.0 {
            return RAMP[0];
        }
        let t = (value / max).clamp(0.0, 1.0);
        let idx = ((t * (RAMP.len() - 1) as f64) as usize).min(RAMP.len() - 1);
        RAMP[idx]
    }

    /// Raster a `cell(row, col)` lookup of `rows x cols` source bins down
    /// to the renderer's character raster, keeping the max per cell. A
    /// zero-sized raster is treated as one character per axis.
    fn raster<F: Fn(usize, usize) -> f64>(
        &self,
        rows: usize,
        cols: usize,
        max: f64,
        cell: F,
    ) -> String {
        let rows_per_char = rows.div_ceil(self.height.max(1));
        let cols_per_char = cols.div_ceil(self.width.max(1));
        let mut out = String::new();
        let mut r0 = 0usize;
        while r0 < rows {
            let r1 = (r0 + rows_per_char).min(rows);
            let mut c0 = 0usize;
            while c0 < cols {
                let c1 = (c0 + cols_per_char).min(cols);
                let mut peak = f64::NEG_INFINITY;
                for r in r0..r1 {
                    for c in c0..c1 {
                        peak = peak.max(cell(r, c));
                    }
                }
                out.push(Self::shade(peak, max));
                c0 = c1;
            }
            out.push('\n');
            r0 = r1;
        }
        out
    }
}

impl ChartRenderer for AsciiRenderer {
    type Output = String;

    fn density(&mut self, figure: &DensityFigure<'_>) -> String {
        let grid = figure.grid;
        let w = grid.width();
        let max = grid.cells().iter().copied().max().unwrap_or(0) as f64;
        let mut out = format!(
            "{} vs {} [{}]: {}x{} bins, x [{:.3}, {:.3}], y [{:.3}, {:.3}]\n",
            figure.y_label,
            figure.x_label,
            figure.colormap.as_str(),
            w,
            w,
            figure.x_domain.lower,
            figure.x_domain.upper,
            figure.y_domain.lower,
            figure.y_domain.upper,
        );
        // Highest y-bin first so the vertical axis points up.
        out.push_str(&self.raster(w, w, max, |r, c| grid.count(w - 1 - r, c) as f64));
        out
    }

    fn spectrogram(&mut self, figure: &SpectrogramFigure<'_>) -> String {
        let result = figure.result;
        let (freq_bins, windows) = result.shape();
        let mut max = f64::NEG_INFINITY;
        for w in 0..windows {
            for &v in result.column(w) {
                max = max.max(v);
            }
        }
        let mut out = format!(
            "{} vs {} [{}]: {} windows x {} frequencies\n",
            figure.frequency_label,
            figure.time_label,
            figure.colormap.as_str(),
            windows,
            freq_bins,
        );
        // Rows are frequency bins (highest first), columns are windows.
        out.push_str(&self.raster(freq_bins, windows, max, |r, c| {
            result.value(freq_bins - 1 - r, c)
        }));
        if figure.show_peak_trace {
            let trace = result.peak_frequency_trace();
            out.push_str(&format!(
                "peak frequency: first {:.4}, last {:.4}\n",
                trace.first().copied().unwrap_or(f64::NAN),
                trace.last().copied().unwrap_or(f64::NAN),
            ));
        }
        out
    }

    fn histogram(&mut self, figure: &HistogramFigure<'_>) -> String {
        let max = figure.counts.iter().copied().max().unwrap_or(0) as f64;
        let bins = figure.counts.len();
        let span = figure.range.span();
        let mut out = format!("{}: {} bins\n", figure.label, bins);
        for (i, &count) in figure.counts.iter().enumerate() {
            let edge = figure.range.lower + i as f64 * span / bins as f64;
            let bar_len = if max > 0.0 {
                (count as f64 / max * self.width as f64) as usize
            } else {
                0
            };
            let next = edge + span / bins as f64;
            let low_here = figure.low_cut.is_some_and(|v| v >= edge && v < next);
            let high_here = figure.high_cut.is_some_and(|v| v >= edge && v < next);
            let mark = match (low_here, high_here) {
                (true, true) => 'X',
                (true, false) => 'L',
                (false, true) => 'H',
                (false, false) => ' ',
            };
            out.push_str(&format!(
                "{edge:>10.3} {mark}|{}\n",
                "█".repeat(bar_len)
            ));
        }
        out
    }
}
