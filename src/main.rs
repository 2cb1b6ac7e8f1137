//! speedplot: a desktop internet speed monitor.
//!
//! Run with:  `RUST_LOG=info speedplot`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("speedplot v{} starting", env!("CARGO_PKG_VERSION"));

    let cfg = speedplot::MonitorConfig::load_from_default_path()
        .map_err(anyhow::Error::msg)?;
    speedplot::run_monitor(cfg).map_err(|e| anyhow::anyhow!("{e}"))
}
