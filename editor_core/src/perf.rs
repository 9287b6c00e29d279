//! Highlight timing.
//!
//! The editor re-highlights the whole buffer on every change; these stats let
//! the caller see what that costs and decide whether to debounce.

use std::collections::VecDeque;
use std::time::Duration;

/// Maximum number of samples to keep for rolling averages.
const MAX_SAMPLES: usize = 120;

/// Statistics over the most recent `MAX_SAMPLES` highlight passes.
///
/// Every figure covers only the samples still in the window.
#[derive(Debug, Clone)]
pub struct RollingStats {
    samples: VecDeque<Duration>,
    sum: Duration,
}

impl Default for RollingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingStats {
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(MAX_SAMPLES),
            sum: Duration::ZERO,
        }
    }

    /// Records a sample, evicting the oldest once the window is full.
    pub fn record(&mut self, duration: Duration) {
        if self.samples.len() >= MAX_SAMPLES {
            if let Some(old) = self.samples.pop_front() {
                self.sum = self.sum.saturating_sub(old);
            }
        }
        self.samples.push_back(duration);
        self.sum += duration;
    }

    /// Returns the number of samples in the window.
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    /// Returns the average duration.
    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            Duration::ZERO
        } else {
            self.sum / self.samples.len() as u32
        }
    }

    /// Returns the fastest pass in the window.
    pub fn min(&self) -> Duration {
        self.samples.iter().min().copied().unwrap_or(Duration::ZERO)
    }

    /// Returns the slowest pass in the window.
    pub fn max(&self) -> Duration {
        self.samples.iter().max().copied().unwrap_or(Duration::ZERO)
    }

    /// Returns the most recent duration.
    pub fn last(&self) -> Duration {
        self.samples.back().copied().unwrap_or(Duration::ZERO)
    }
}

/// Milliseconds, for log lines.
pub fn as_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
