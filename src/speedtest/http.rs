//! HTTP speed-test client: timed transfers against public speed endpoints.

use std::io::Read;
use std::time::{Duration, Instant};

use crate::config::MonitorConfig;
use crate::speedtest::{mbps, SpeedTestClient, SpeedTestError};

const READ_CHUNK: usize = 64 * 1024;

/// Measures throughput with one timed HTTP transfer per direction.
///
/// Download streams a sized payload from `download_url` and counts received
/// bytes; upload POSTs a generated payload to `upload_url`. Both rates are
/// bytes-on-the-wire over wall-clock elapsed time, so they include connection
/// setup, the way the endpoints themselves report speed.
pub struct HttpSpeedTest {
    agent: ureq::Agent,
    download_url: String,
    upload_url: String,
    upload_payload: Vec<u8>,
}

impl HttpSpeedTest {
    pub fn new(cfg: &MonitorConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(cfg.request_timeout())
            .timeout_connect(Duration::from_secs_f64(cfg.request_timeout_secs.min(10.0)))
            .build();
        Self {
            agent,
            download_url: cfg.download_url.clone(),
            upload_url: cfg.upload_url.clone(),
            upload_payload: build_payload(cfg.upload_bytes),
        }
    }
}

impl SpeedTestClient for HttpSpeedTest {
    fn prepare(&mut self) -> Result<(), SpeedTestError> {
        // Cheap reachability probe; also pre-resolves DNS and warms the
        // connection pool before the first real measurement.
        self.agent.head(&self.download_url).call()?;
        Ok(())
    }

    fn measure_download(&mut self) -> Result<f64, SpeedTestError> {
        let started = Instant::now();
        let response = self.agent.get(&self.download_url).call()?;
        let mut reader = response.into_reader();
        let mut buf = [0u8; READ_CHUNK];
        let mut received: u64 = 0;
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            received += n as u64;
        }
        mbps(received, started.elapsed())
    }

    fn measure_upload(&mut self) -> Result<f64, SpeedTestError> {
        let started = Instant::now();
        self.agent
            .post(&self.upload_url)
            .set("Content-Type", "application/octet-stream")
            .send_bytes(&self.upload_payload)?;
        mbps(self.upload_payload.len() as u64, started.elapsed())
    }
}

/// Incompressible-enough payload without pulling in an RNG: a rolling byte
/// pattern so intermediaries can't collapse it to a trivial run.
fn build_payload(len: usize) -> Vec<u8> {
    let mut payload = Vec::with_capacity(len);
    let mut state: u32 = 0x9e37_79b9;
    for _ in 0..len {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        payload.push((state >> 24) as u8);
    }
    payload
}
