//! The speed-test engine: the client seam, its error type, and the
//! background worker threads that drive it.
//!
//! The monitor never talks to the network directly; it goes through the
//! [`SpeedTestClient`] trait so tests can substitute a scripted client.

pub mod http;
pub mod worker;

use thiserror::Error;

/// Errors produced by speed-test clients.
#[derive(Debug, Error)]
pub enum SpeedTestError {
    #[error("transport error: {0}")]
    Transport(#[from] Box<ureq::Error>),
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
    #[error("i/o error during transfer: {0}")]
    Io(#[from] std::io::Error),
    #[error("speed-test client not available")]
    NotReady,
    #[error("transfer finished instantly, cannot derive a rate")]
    ZeroDuration,
}

impl From<ureq::Error> for SpeedTestError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => SpeedTestError::HttpStatus(code),
            other => SpeedTestError::Transport(Box::new(other)),
        }
    }
}

/// A client capable of measuring line throughput.
///
/// All methods block; they are only ever called from worker threads.
pub trait SpeedTestClient: Send {
    /// Warm up the client (connection/server discovery). Called once, off the
    /// GUI thread, before the Start control is enabled.
    fn prepare(&mut self) -> Result<(), SpeedTestError>;

    /// Measure download throughput in Mbps.
    fn measure_download(&mut self) -> Result<f64, SpeedTestError>;

    /// Measure upload throughput in Mbps.
    fn measure_upload(&mut self) -> Result<f64, SpeedTestError>;
}

/// Convert a transferred byte count and elapsed time into Mbps.
pub(crate) fn mbps(bytes: u64, elapsed: std::time::Duration) -> Result<f64, SpeedTestError> {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return Err(SpeedTestError::ZeroDuration);
    }
    Ok(bytes as f64 * 8.0 / secs / 1e6)
}
