use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use speedplot::sink::{channel_events, MonitorEvent};
use speedplot::speedtest::worker::{spawn_client_init, spawn_monitor, SharedClient};
use speedplot::speedtest::{SpeedTestClient, SpeedTestError};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Plays back a prepared script of measurement results; runs dry with an
/// error so the loop always terminates.
struct ScriptedClient {
    prepare_result: Option<Result<(), SpeedTestError>>,
    downloads: VecDeque<Result<f64, SpeedTestError>>,
    uploads: VecDeque<Result<f64, SpeedTestError>>,
}

impl ScriptedClient {
    fn new() -> Self {
        Self {
            prepare_result: None,
            downloads: VecDeque::new(),
            uploads: VecDeque::new(),
        }
    }

    fn into_shared(self) -> SharedClient {
        Arc::new(Mutex::new(Box::new(self)))
    }
}

impl SpeedTestClient for ScriptedClient {
    fn prepare(&mut self) -> Result<(), SpeedTestError> {
        self.prepare_result.take().unwrap_or(Ok(()))
    }

    fn measure_download(&mut self) -> Result<f64, SpeedTestError> {
        self.downloads
            .pop_front()
            .unwrap_or(Err(SpeedTestError::NotReady))
    }

    fn measure_upload(&mut self) -> Result<f64, SpeedTestError> {
        self.uploads
            .pop_front()
            .unwrap_or(Err(SpeedTestError::NotReady))
    }
}

/// Never fails, never runs dry; used for flag-based cancellation tests.
struct ConstantClient;

impl SpeedTestClient for ConstantClient {
    fn prepare(&mut self) -> Result<(), SpeedTestError> {
        Ok(())
    }

    fn measure_download(&mut self) -> Result<f64, SpeedTestError> {
        Ok(50.0)
    }

    fn measure_upload(&mut self) -> Result<f64, SpeedTestError> {
        Ok(10.0)
    }
}

#[test]
fn init_posts_client_ready_on_success() {
    let (sink, rx) = channel_events();
    let client = ScriptedClient::new().into_shared();
    spawn_client_init(client, sink).join().unwrap();

    match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
        MonitorEvent::ClientReady => {}
        _ => panic!("expected ClientReady"),
    }
}

#[test]
fn init_posts_connection_error_on_failure() {
    let (sink, rx) = channel_events();
    let mut scripted = ScriptedClient::new();
    scripted.prepare_result = Some(Err(SpeedTestError::HttpStatus(503)));
    spawn_client_init(scripted.into_shared(), sink).join().unwrap();

    match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
        MonitorEvent::Failed(msg) => {
            assert!(msg.starts_with("Connection error:"), "got {:?}", msg);
        }
        _ => panic!("expected Failed"),
    }
}

#[test]
fn loop_posts_one_sample_per_cycle_and_stops_on_first_error() {
    let (sink, rx) = channel_events();
    let mut scripted = ScriptedClient::new();
    scripted.downloads = VecDeque::from([Ok(10.0), Ok(20.0), Err(SpeedTestError::HttpStatus(500))]);
    scripted.uploads = VecDeque::from([Ok(1.0), Ok(2.0)]);

    let running = Arc::new(AtomicBool::new(true));
    let handle = spawn_monitor(
        scripted.into_shared(),
        sink,
        Duration::ZERO,
        running.clone(),
    );
    handle.join().unwrap();

    let mut speeds = Vec::new();
    let mut failures = Vec::new();
    while let Ok(event) = rx.try_recv() {
        match event {
            MonitorEvent::Sample(s) => speeds.push((s.download_mbps, s.upload_mbps)),
            MonitorEvent::Failed(msg) => failures.push(msg),
            MonitorEvent::ClientReady => panic!("unexpected ClientReady"),
        }
    }
    assert_eq!(speeds, vec![(10.0, 1.0), (20.0, 2.0)]);
    assert_eq!(failures.len(), 1, "exactly one failure, no retry");
    assert!(
        !running.load(Ordering::Relaxed),
        "error must clear the running flag"
    );
}

#[test]
fn clearing_the_flag_ends_the_session() {
    let (sink, rx) = channel_events();
    let client: SharedClient = Arc::new(Mutex::new(Box::new(ConstantClient)));

    let running = Arc::new(AtomicBool::new(true));
    let handle = spawn_monitor(client, sink, Duration::from_millis(50), running.clone());

    // Wait for the first cycle, then ask the session to stop.
    match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
        MonitorEvent::Sample(s) => {
            assert_eq!(s.download_mbps, 50.0);
            assert_eq!(s.upload_mbps, 10.0);
        }
        _ => panic!("expected Sample"),
    }
    running.store(false, Ordering::Relaxed);
    handle.join().unwrap();

    // A stopped session never reports a failure.
    while let Ok(event) = rx.try_recv() {
        if let MonitorEvent::Failed(msg) = event {
            panic!("unexpected failure: {}", msg);
        }
    }
}

#[test]
fn flag_already_cleared_runs_no_cycle() {
    let (sink, rx) = channel_events();
    let client: SharedClient = Arc::new(Mutex::new(Box::new(ConstantClient)));

    let running = Arc::new(AtomicBool::new(false));
    spawn_monitor(client, sink, Duration::ZERO, running)
        .join()
        .unwrap();
    assert!(rx.try_recv().is_err(), "no events for a dead session");
}
