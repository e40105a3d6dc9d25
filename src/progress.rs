//! Progress notification for long-running scans.
//!
//! Operational visibility only: nothing downstream depends on these
//! notifications, and a scan without a sink behaves identically.

/// One progress notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Windows processed so far.
    pub done: usize,
    /// Total windows in this scan.
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.done as f64 * 100.0 / self.total as f64
        }
    }
}

/// Boxed callback receiving progress notifications.
pub type ProgressSink = Box<dyn FnMut(Progress) + Send>;

/// A sink that reports through `tracing` at debug level.
pub fn log_sink() -> ProgressSink {
    Box::new(|p: Progress| {
        tracing::debug!(done = p.done, total = p.total, percent = p.percent(), "spectrogram scan");
    })
}
