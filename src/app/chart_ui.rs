//! egui painting of the rolling speed chart.
//!
//! All coordinate math lives in [`crate::data::chart`]; this module only
//! turns a laid-out [`ChartFrame`] into egui shapes. A frame that fails to
//! lay out is logged and skipped, never crashing the UI.

use egui::{Align2, Color32, FontId, Pos2, Stroke};

use crate::data::chart::{self, ChartFrame, SeriesGeometry};
use crate::data::history::SpeedHistory;

pub const DOWNLOAD_COLOR: Color32 = Color32::from_rgb(0x2a, 0x9d, 0xf4);
pub const UPLOAD_COLOR: Color32 = Color32::from_rgb(0xff, 0x9f, 0x1c);

const CHART_BG: Color32 = Color32::from_rgb(0x2b, 0x2b, 0x2b);
const GRID_COLOR: Color32 = Color32::from_rgb(0x3a, 0x3a, 0x3a);
const LABEL_COLOR: Color32 = Color32::from_gray(0xd0);

const CURVE_WIDTH: f32 = 2.0;
const MARKER_RADIUS: f32 = 3.0;

/// Paint the chart into the remaining space of `ui`.
pub fn draw(ui: &mut egui::Ui, history: &SpeedHistory, subdivisions: usize) {
    let (rect, _response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 6.0, CHART_BG);

    let area = chart::plot_area(
        rect.left() as f64,
        rect.top() as f64,
        rect.width() as f64,
        rect.height() as f64,
    );
    let frame = match chart::layout(history, area, subdivisions) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(error = %e, "skipping chart frame");
            return;
        }
    };

    paint_grid(&painter, &frame);
    paint_series(&painter, &frame.download, DOWNLOAD_COLOR);
    paint_series(&painter, &frame.upload, UPLOAD_COLOR);
    paint_legend(&painter, &frame);
}

fn paint_grid(painter: &egui::Painter, frame: &ChartFrame) {
    let font = FontId::proportional(10.0);
    let area = &frame.area;

    for tick in &frame.speed_ticks {
        let y = tick.y as f32;
        painter.line_segment(
            [
                Pos2::new(area.left as f32, y),
                Pos2::new(area.right as f32, y),
            ],
            Stroke::new(1.0, GRID_COLOR),
        );
        painter.text(
            Pos2::new(area.left as f32 - 6.0, y),
            Align2::RIGHT_CENTER,
            &tick.label,
            font.clone(),
            LABEL_COLOR,
        );
    }

    for tick in &frame.time_ticks {
        painter.text(
            Pos2::new(tick.x as f32, area.bottom as f32 + 4.0),
            Align2::CENTER_TOP,
            &tick.label,
            font.clone(),
            LABEL_COLOR,
        );
    }
}

fn paint_series(painter: &egui::Painter, series: &SeriesGeometry, color: Color32) {
    if series.curve.len() >= 2 {
        painter.add(egui::Shape::line(
            to_pos2(&series.curve),
            Stroke::new(CURVE_WIDTH, color),
        ));
    }
    for p in &series.points {
        painter.circle_filled(Pos2::new(p[0] as f32, p[1] as f32), MARKER_RADIUS, color);
    }
}

fn paint_legend(painter: &egui::Painter, frame: &ChartFrame) {
    let font = FontId::proportional(11.0);
    let mut anchor = Pos2::new(frame.area.left as f32 + 10.0, frame.area.top as f32 + 6.0);
    for (label, color) in [("Download", DOWNLOAD_COLOR), ("Upload", UPLOAD_COLOR)] {
        painter.line_segment(
            [anchor, Pos2::new(anchor.x + 16.0, anchor.y)],
            Stroke::new(CURVE_WIDTH, color),
        );
        let rect = painter.text(
            Pos2::new(anchor.x + 20.0, anchor.y),
            Align2::LEFT_CENTER,
            label,
            font.clone(),
            LABEL_COLOR,
        );
        anchor.y = rect.bottom() + 8.0;
    }
}

fn to_pos2(points: &[[f64; 2]]) -> Vec<Pos2> {
    points
        .iter()
        .map(|p| Pos2::new(p[0] as f32, p[1] as f32))
        .collect()
}
