//! Top-level entry point for running the speed monitor as a native window.

use std::sync::{Arc, Mutex};

use eframe::egui;

use crate::config::MonitorConfig;
use crate::sink::channel_events;
use crate::speedtest::http::HttpSpeedTest;
use crate::speedtest::worker::{self, SharedClient};

use super::MonitorApp;

/// Launch the monitor in a native window.
///
/// Wires the event channel, kicks off the client warm-up thread, and enters
/// the eframe event loop. Blocks until the window is closed.
pub fn run_monitor(cfg: MonitorConfig) -> eframe::Result<()> {
    let (sink, rx) = channel_events();
    let client: SharedClient = Arc::new(Mutex::new(Box::new(HttpSpeedTest::new(&cfg))));
    worker::spawn_client_init(client.clone(), sink.clone());

    let title = cfg.title.clone();
    let app = MonitorApp::new(rx, sink, client, cfg);

    let mut opts = eframe::NativeOptions::default();
    opts.viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1100.0, 800.0))
        .with_min_inner_size(egui::vec2(1000.0, 700.0));

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app))
        }),
    )
}
