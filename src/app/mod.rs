//! Application layer: the eframe app, the chart painter, and the run helper.

mod chart_ui;
mod monitor_app;
mod run;

pub use monitor_app::MonitorApp;
pub use run::run_monitor;
