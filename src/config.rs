//! Configuration for the monitor: measurement cadence, history size, chart
//! smoothing, and the HTTP endpoints the speed test runs against.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for the speed monitor.
///
/// All fields have working defaults; a missing config file is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Native window title.
    pub title: String,
    /// Seconds between measurement cycles.
    pub test_interval_secs: f64,
    /// Maximum number of samples retained in the rolling history.
    pub max_samples: usize,
    /// Subdivisions per Catmull-Rom segment in the chart curves.
    pub spline_subdivisions: usize,
    /// Per-request timeout for the HTTP measurement transfers.
    pub request_timeout_secs: f64,
    /// URL serving a sized download payload.
    pub download_url: String,
    /// URL accepting an upload payload.
    pub upload_url: String,
    /// Size of the generated upload payload in bytes.
    pub upload_bytes: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            title: "Speed Monitor".to_string(),
            test_interval_secs: 10.0,
            max_samples: 20,
            spline_subdivisions: 16,
            request_timeout_secs: 15.0,
            download_url: "https://speed.cloudflare.com/__down?bytes=10000000".to_string(),
            upload_url: "https://speed.cloudflare.com/__up".to_string(),
            upload_bytes: 2_000_000,
        }
    }
}

impl MonitorConfig {
    /// `$HOME/.speedplot/config.json`
    pub fn default_path() -> Result<PathBuf, String> {
        let home = std::env::var("HOME").map_err(|e| format!("HOME env var not set: {}", e))?;
        Ok(PathBuf::from(home).join(".speedplot").join("config.json"))
    }

    /// Load the config from the default path.
    ///
    /// A missing file yields defaults; a malformed file is an error so a typo
    /// doesn't silently revert every setting.
    pub fn load_from_default_path() -> Result<Self, String> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        serde_json::from_str(&s).map_err(|e| format!("Malformed config {:?}: {}", path, e))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create dir {:?}: {}", dir, e))?;
        }
        let s = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Serialization error: {}", e))?;
        std::fs::write(path, s).map_err(|e| format!("Failed to write {:?}: {}", path, e))
    }

    pub fn test_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(self.test_interval_secs.max(0.0))
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(self.request_timeout_secs.max(0.0))
    }
}
