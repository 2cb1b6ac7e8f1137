//! Data layer: rolling sample history, chart geometry, spline smoothing,
//! and CSV export.

pub mod chart;
pub mod export;
pub mod history;
pub mod spline;
