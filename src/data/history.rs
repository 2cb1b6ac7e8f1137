//! Bounded rolling history of speed samples plus the chart's scale state.

use std::collections::VecDeque;

use crate::sink::SpeedSample;

/// Fixed-capacity FIFO of the most recent measurements.
///
/// The running peak (`peak_mbps`) is the Y-axis scale state: it only grows
/// while a monitoring session runs, and is reset when a new session starts so
/// the chart re-scales to fresh conditions.
pub struct SpeedHistory {
    samples: VecDeque<SpeedSample>,
    capacity: usize,
    peak_mbps: f64,
}

impl SpeedHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
            peak_mbps: 0.0,
        }
    }

    /// Append a sample, evicting the oldest entry on overflow.
    ///
    /// Non-finite measurements are dropped and never reach the chart or the
    /// export file. Returns whether the sample was accepted.
    pub fn push(&mut self, sample: SpeedSample) -> bool {
        if !sample.is_finite() {
            tracing::debug!(
                download = sample.download_mbps,
                upload = sample.upload_mbps,
                "dropping non-finite sample"
            );
            return false;
        }
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        self.peak_mbps = self
            .peak_mbps
            .max(sample.download_mbps)
            .max(sample.upload_mbps);
        true
    }

    /// Running maximum of all accepted speeds since the last reset.
    ///
    /// Monotonically non-decreasing between resets; eviction does not lower it.
    pub fn peak_mbps(&self) -> f64 {
        self.peak_mbps
    }

    /// Reset the scale state. Called when monitoring (re)starts.
    pub fn reset_peak(&mut self) {
        self.peak_mbps = 0.0;
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeedSample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&SpeedSample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&SpeedSample> {
        self.samples.front()
    }
}
