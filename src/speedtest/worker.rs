//! Background threads around the speed-test client.
//!
//! One init thread warms the client up at application start; one worker
//! thread per monitoring session runs the measurement loop. Both report back
//! exclusively through the [`EventSink`] channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::Local;

use crate::sink::{EventSink, SpeedSample};
use crate::speedtest::{SpeedTestClient, SpeedTestError};

/// The client handle shared between the GUI and worker threads. A single
/// mutex serializes all access, so at most one measurement runs at a time.
pub type SharedClient = Arc<Mutex<Box<dyn SpeedTestClient>>>;

/// Granularity of the interval sleep; Stop takes effect within one slice.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Warm the client up off the GUI thread.
///
/// Posts `ClientReady` on success so the UI can enable its controls, or
/// `Failed` with a connection error message.
pub fn spawn_client_init(client: SharedClient, sink: EventSink) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let result = match client.lock() {
            Ok(mut guard) => guard.prepare(),
            Err(_) => Err(SpeedTestError::NotReady),
        };
        match result {
            Ok(()) => {
                tracing::info!("speed-test client ready");
                sink.client_ready();
            }
            Err(e) => {
                tracing::warn!(error = %e, "speed-test client initialization failed");
                sink.failed(format!("Connection error: {}", e));
            }
        }
    })
}

/// Run the measurement loop until `running` clears or a measurement fails.
///
/// Each cycle measures download then upload (holding the client lock for the
/// whole cycle), posts one [`SpeedSample`], and sleeps the interval. The
/// first error posts `Failed`, clears `running`, and ends the session; there
/// is no retry.
pub fn spawn_monitor(
    client: SharedClient,
    sink: EventSink,
    interval: Duration,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        tracing::info!(interval_secs = interval.as_secs_f64(), "monitoring started");
        while running.load(Ordering::Relaxed) {
            match measure_cycle(&client) {
                Ok((download, upload)) => {
                    sink.sample(SpeedSample::new(Local::now(), download, upload));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "measurement failed, stopping monitor");
                    sink.failed(e.to_string());
                    running.store(false, Ordering::Relaxed);
                    break;
                }
            }
            sleep_while_running(interval, &running);
        }
        tracing::info!("monitoring stopped");
    })
}

/// One measurement cycle: download then upload under the client lock.
fn measure_cycle(client: &SharedClient) -> Result<(f64, f64), SpeedTestError> {
    let mut guard = client.lock().map_err(|_| SpeedTestError::NotReady)?;
    let download = guard.measure_download()?;
    let upload = guard.measure_upload()?;
    Ok((download, upload))
}

/// Sleep `total` in slices, returning early once `running` clears.
fn sleep_while_running(total: Duration, running: &AtomicBool) {
    let mut remaining = total;
    while !remaining.is_zero() && running.load(Ordering::Relaxed) {
        let slice = remaining.min(SLEEP_SLICE);
        std::thread::sleep(slice);
        remaining = remaining.saturating_sub(slice);
    }
}
