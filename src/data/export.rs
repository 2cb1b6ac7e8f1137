//! CSV export of the retained measurement history.

use std::io::Write;
use std::path::Path;

use crate::data::history::SpeedHistory;

/// Header of the export file.
pub const CSV_HEADER: &str = "Date,Time,Download (Mbps),Upload (Mbps)";

/// Write the history as comma-separated text: one row per retained sample,
/// speeds with exactly two decimals.
pub fn write_history_csv<W: Write>(mut w: W, history: &SpeedHistory) -> std::io::Result<()> {
    writeln!(w, "{}", CSV_HEADER)?;
    for sample in history.iter() {
        writeln!(
            w,
            "{},{:.2},{:.2}",
            sample.timestamp.format("%Y-%m-%d,%H:%M:%S"),
            sample.download_mbps,
            sample.upload_mbps
        )?;
    }
    Ok(())
}

/// Write the history CSV to a file path.
pub fn save_history_csv<P: AsRef<Path>>(path: P, history: &SpeedHistory) -> std::io::Result<()> {
    let f = std::fs::File::create(path)?;
    write_history_csv(std::io::BufWriter::new(f), history)
}

/// Default filename for the `counter`-th export.
pub fn default_export_filename(counter: u32) -> String {
    format!("speed_history_{}.txt", counter)
}
