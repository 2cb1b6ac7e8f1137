//! The eframe application: readouts, controls, status line, and the chart.
//!
//! All mutation happens here on the GUI thread. Worker threads communicate
//! through the [`MonitorEvent`] channel, drained once per frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use egui::{Color32, RichText};

use crate::config::MonitorConfig;
use crate::data::export;
use crate::data::history::SpeedHistory;
use crate::sink::{EventSink, MonitorEvent};
use crate::speedtest::worker::{self, SharedClient};

use super::chart_ui;

const STATUS_MUTED: Color32 = Color32::from_rgb(0xaa, 0xaa, 0xaa);
const STATUS_INACTIVE: Color32 = Color32::from_rgb(0x6c, 0x75, 0x7d);
const STATUS_OK: Color32 = Color32::from_rgb(0x28, 0xa7, 0x45);
const STATUS_ERROR: Color32 = Color32::from_rgb(0xdc, 0x35, 0x45);

/// Error messages are truncated to keep the status line one row tall.
const STATUS_ERROR_MAX: usize = 70;

/// Top-level application state.
pub struct MonitorApp {
    rx: Receiver<MonitorEvent>,
    sink: EventSink,
    client: SharedClient,
    cfg: MonitorConfig,

    history: SpeedHistory,
    running: Arc<AtomicBool>,
    /// Set once the client init thread posts `ClientReady`; the Start and
    /// Export controls stay disabled until then.
    client_ready: bool,

    status: String,
    status_color: Color32,
    export_counter: u32,
}

impl MonitorApp {
    pub fn new(
        rx: Receiver<MonitorEvent>,
        sink: EventSink,
        client: SharedClient,
        cfg: MonitorConfig,
    ) -> Self {
        Self {
            rx,
            sink,
            client,
            history: SpeedHistory::new(cfg.max_samples),
            cfg,
            running: Arc::new(AtomicBool::new(false)),
            client_ready: false,
            status: "Status: Inactive".to_string(),
            status_color: STATUS_MUTED,
            export_counter: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event handling
    // ─────────────────────────────────────────────────────────────────────────

    fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                MonitorEvent::ClientReady => {
                    self.client_ready = true;
                }
                MonitorEvent::Sample(sample) => {
                    if self.history.push(sample) {
                        self.status = format!(
                            "Last test: {}",
                            sample.timestamp.format("%H:%M:%S")
                        );
                        self.status_color = STATUS_OK;
                    }
                }
                MonitorEvent::Failed(message) => {
                    self.show_error(&message);
                    self.stop_monitoring();
                }
            }
        }
    }

    fn show_error(&mut self, message: &str) {
        let short: String = message.chars().take(STATUS_ERROR_MAX).collect();
        self.status = format!("Error: {}", short);
        self.status_color = STATUS_ERROR;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Monitoring session control
    // ─────────────────────────────────────────────────────────────────────────

    fn toggle_monitoring(&mut self) {
        if self.is_running() {
            self.stop_monitoring();
            self.status = "Status: Inactive".to_string();
            self.status_color = STATUS_INACTIVE;
        } else {
            self.start_monitoring();
        }
    }

    fn start_monitoring(&mut self) {
        // Fresh session, fresh Y scale.
        self.history.reset_peak();
        self.running.store(true, Ordering::Relaxed);
        let _ = worker::spawn_monitor(
            self.client.clone(),
            self.sink.clone(),
            self.cfg.test_interval(),
            self.running.clone(),
        );
        self.status = "Status: Monitoring active".to_string();
        self.status_color = STATUS_OK;
    }

    fn stop_monitoring(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    fn export_data(&mut self) {
        if self.history.is_empty() {
            self.show_error("No data to export");
            return;
        }
        let default_name = export::default_export_filename(self.export_counter);
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("Text", &["txt", "csv"])
            .save_file()
        else {
            return;
        };
        match export::save_history_csv(&path, &self.history) {
            Ok(()) => {
                self.export_counter += 1;
                let shown = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| default_name.clone());
                self.status = format!("Data exported: {}", shown);
                self.status_color = STATUS_OK;
                tracing::info!(path = %path.display(), rows = self.history.len(), "history exported");
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.show_error(&format!("Export error: {}", e));
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI
    // ─────────────────────────────────────────────────────────────────────────

    fn readout(ui: &mut egui::Ui, value: f64, label: &str, color: Color32) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(format!("{:.2}", value)).size(34.0).strong().color(color));
            ui.label(RichText::new(label).size(12.0).color(STATUS_MUTED));
        });
    }

    fn top_panel(&mut self, ui: &mut egui::Ui) {
        let (download, upload) = self
            .history
            .latest()
            .map(|s| (s.download_mbps, s.upload_mbps))
            .unwrap_or((0.0, 0.0));

        ui.add_space(8.0);
        ui.columns(2, |cols| {
            Self::readout(&mut cols[0], download, "DOWNLOAD (Mbps)", chart_ui::DOWNLOAD_COLOR);
            Self::readout(&mut cols[1], upload, "UPLOAD (Mbps)", chart_ui::UPLOAD_COLOR);
        });
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let toggle_label = if self.is_running() {
                format!("{} STOP MONITORING", egui_phosphor::regular::STOP)
            } else {
                format!("{} START MONITORING", egui_phosphor::regular::PLAY)
            };
            let toggle = egui::Button::new(RichText::new(toggle_label).strong())
                .min_size(egui::vec2(200.0, 40.0));
            if ui.add_enabled(self.client_ready, toggle).clicked() {
                self.toggle_monitoring();
            }

            let export = egui::Button::new(
                RichText::new(format!("{} EXPORT DATA", egui_phosphor::regular::EXPORT)).strong(),
            )
            .min_size(egui::vec2(200.0, 40.0));
            if ui.add_enabled(self.client_ready, export).clicked() {
                self.export_data();
            }
        });

        ui.add_space(4.0);
        ui.label(RichText::new(&self.status).size(12.0).color(self.status_color));
        ui.add_space(4.0);
    }
}

impl eframe::App for MonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        if ctx.input(|i| i.viewport().close_requested()) {
            self.stop_monitoring();
        }

        egui::TopBottomPanel::top("readouts").show(ctx, |ui| {
            self.top_panel(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            chart_ui::draw(ui, &self.history, self.cfg.spline_subdivisions);
        });

        // Keep draining worker events even when no input arrives.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

impl Drop for MonitorApp {
    fn drop(&mut self) {
        // The worker checks this flag at loop top and during the interval
        // sleep, so it winds down shortly after the window closes.
        self.stop_monitoring();
    }
}
