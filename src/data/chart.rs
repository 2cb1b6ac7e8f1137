//! Chart geometry for the rolling dual-series waveform.
//!
//! This is the pure layout pass: it turns the sample history into normalized
//! point coordinates, smoothed curves, and axis ticks inside a drawing
//! region. Painting happens in `app::chart_ui`; keeping the math here makes
//! the renderer testable without an egui context.
//!
//! Mapping rules:
//! - X is time-proportional: each sample sits between the first and last
//!   timestamp of the buffer, not at its index. Equal timestamps collapse
//!   everything to the left edge.
//! - Y is inverse-linear against the running peak, floored at 1 Mbps so an
//!   all-zero session doesn't divide by zero. The peak maps exactly onto the
//!   top edge, zero onto the bottom edge.

use thiserror::Error;

use crate::data::history::SpeedHistory;
use crate::data::spline;

/// Inner drawing region in screen coordinates (margins already subtracted).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Margins reserved around the plot area for tick labels.
pub const MARGIN_LEFT: f64 = 56.0;
pub const MARGIN_RIGHT: f64 = 12.0;
pub const MARGIN_TOP: f64 = 12.0;
pub const MARGIN_BOTTOM: f64 = 26.0;

/// Number of horizontal grid divisions.
const Y_DIVISIONS: usize = 5;
/// Approximate pixel width of one `HH:MM:SS` label; controls tick thinning.
const TIME_LABEL_WIDTH: f64 = 56.0;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing region is degenerate ({width:.1}x{height:.1})")]
    DegenerateArea { width: f64, height: f64 },
}

/// One series' layout: raw sample points and the smoothed polyline.
#[derive(Debug, Clone, Default)]
pub struct SeriesGeometry {
    pub points: Vec<[f64; 2]>,
    pub curve: Vec<[f64; 2]>,
}

/// A labelled tick on the time axis.
#[derive(Debug, Clone)]
pub struct TimeTick {
    pub x: f64,
    pub label: String,
}

/// A labelled horizontal grid line.
#[derive(Debug, Clone)]
pub struct SpeedTick {
    pub y: f64,
    pub label: String,
}

/// The complete layout of one chart frame.
#[derive(Debug, Clone)]
pub struct ChartFrame {
    pub area: PlotArea,
    pub download: SeriesGeometry,
    pub upload: SeriesGeometry,
    pub speed_ticks: Vec<SpeedTick>,
    pub time_ticks: Vec<TimeTick>,
}

/// Shrink the widget rect by the label margins.
///
/// `(x, y)` is the rect origin, `(w, h)` its size.
pub fn plot_area(x: f64, y: f64, w: f64, h: f64) -> PlotArea {
    PlotArea {
        left: x + MARGIN_LEFT,
        top: y + MARGIN_TOP,
        right: x + w - MARGIN_RIGHT,
        bottom: y + h - MARGIN_BOTTOM,
    }
}

/// The effective Y scale: running peak floored at 1 Mbps.
pub fn y_scale(peak_mbps: f64) -> f64 {
    peak_mbps.max(1.0)
}

/// Map a timestamp into the plot area, proportional to elapsed time.
///
/// A non-positive span (single sample, or all timestamps equal) collapses to
/// the left edge.
pub fn x_position(t: f64, t_first: f64, t_last: f64, area: &PlotArea) -> f64 {
    let span = t_last - t_first;
    if span <= 0.0 {
        return area.left;
    }
    area.left + (t - t_first) / span * area.width()
}

/// Map a speed value into the plot area: the scale lands on the top edge,
/// zero on the bottom edge.
pub fn y_position(mbps: f64, peak_mbps: f64, area: &PlotArea) -> f64 {
    area.bottom - mbps / y_scale(peak_mbps) * area.height()
}

/// Lay out one frame of the chart.
///
/// Fails only when the drawing region has no usable extent; the caller logs
/// and skips the frame.
pub fn layout(
    history: &SpeedHistory,
    area: PlotArea,
    subdivisions: usize,
) -> Result<ChartFrame, ChartError> {
    if area.width() <= 0.0 || area.height() <= 0.0 {
        return Err(ChartError::DegenerateArea {
            width: area.width(),
            height: area.height(),
        });
    }

    let peak = history.peak_mbps();
    let (t_first, t_last) = match (history.oldest(), history.latest()) {
        (Some(first), Some(last)) => (first.epoch_secs(), last.epoch_secs()),
        _ => (0.0, 0.0),
    };

    let mut download = SeriesGeometry::default();
    let mut upload = SeriesGeometry::default();
    for sample in history.iter() {
        let x = x_position(sample.epoch_secs(), t_first, t_last, &area);
        download
            .points
            .push([x, y_position(sample.download_mbps, peak, &area)]);
        upload
            .points
            .push([x, y_position(sample.upload_mbps, peak, &area)]);
    }
    download.curve = spline::catmull_rom(&download.points, subdivisions);
    upload.curve = spline::catmull_rom(&upload.points, subdivisions);

    Ok(ChartFrame {
        speed_ticks: speed_ticks(peak, &area),
        time_ticks: time_ticks(history, &download.points, &area),
        area,
        download,
        upload,
    })
}

/// Horizontal grid lines from 0 to the current scale.
fn speed_ticks(peak_mbps: f64, area: &PlotArea) -> Vec<SpeedTick> {
    let scale = y_scale(peak_mbps);
    (0..=Y_DIVISIONS)
        .map(|i| {
            let mbps = scale * i as f64 / Y_DIVISIONS as f64;
            SpeedTick {
                y: y_position(mbps, peak_mbps, area),
                label: format!("{:.1}", mbps),
            }
        })
        .collect()
}

/// One `HH:MM:SS` label per sample, thinned so labels don't overlap.
fn time_ticks(history: &SpeedHistory, xs: &[[f64; 2]], area: &PlotArea) -> Vec<TimeTick> {
    let n = history.len();
    if n == 0 {
        return Vec::new();
    }
    let fitting = (area.width() / TIME_LABEL_WIDTH).floor().max(1.0) as usize;
    let stride = n.div_ceil(fitting).max(1);
    history
        .iter()
        .enumerate()
        .filter(|(i, _)| i % stride == 0 || *i == n - 1)
        .map(|(i, sample)| TimeTick {
            x: xs[i][0],
            label: sample.timestamp.format("%H:%M:%S").to_string(),
        })
        .collect()
}
