//! Sample types and the channel used to feed measurements into the UI.
//!
//! The worker threads never touch UI state directly: they send
//! [`MonitorEvent`]s through an [`EventSink`], and the application drains the
//! receiving end once per frame on the GUI thread.

use std::sync::mpsc::{Receiver, Sender};

use chrono::{DateTime, Local};

/// A single throughput measurement, immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSample {
    /// Wall-clock time the measurement completed.
    pub timestamp: DateTime<Local>,
    pub download_mbps: f64,
    pub upload_mbps: f64,
}

impl SpeedSample {
    pub fn new(timestamp: DateTime<Local>, download_mbps: f64, upload_mbps: f64) -> Self {
        Self {
            timestamp,
            download_mbps,
            upload_mbps,
        }
    }

    /// Timestamp as fractional seconds since the UNIX epoch (chart X values).
    pub fn epoch_secs(&self) -> f64 {
        self.timestamp.timestamp_micros() as f64 * 1e-6
    }

    /// Both speed fields are finite (malformed measurements are dropped).
    pub fn is_finite(&self) -> bool {
        self.download_mbps.is_finite() && self.upload_mbps.is_finite()
    }
}

/// Messages sent from worker threads to the GUI thread.
pub enum MonitorEvent {
    /// The speed-test client finished its warm-up and can serve measurements.
    ClientReady,
    /// One completed measurement cycle.
    Sample(SpeedSample),
    /// The worker hit an unrecoverable error and terminated.
    Failed(String),
}

/// Cloneable sender handle for worker threads.
#[derive(Clone)]
pub struct EventSink {
    tx: Sender<MonitorEvent>,
}

impl EventSink {
    pub fn client_ready(&self) {
        let _ = self.tx.send(MonitorEvent::ClientReady);
    }

    pub fn sample(&self, sample: SpeedSample) {
        let _ = self.tx.send(MonitorEvent::Sample(sample));
    }

    pub fn failed<S: Into<String>>(&self, message: S) {
        let _ = self.tx.send(MonitorEvent::Failed(message.into()));
    }
}

/// Create a new channel pair: `(EventSink, Receiver<MonitorEvent>)`.
pub fn channel_events() -> (EventSink, Receiver<MonitorEvent>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (EventSink { tx }, rx)
}
