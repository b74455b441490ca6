//! Specmap GUI application entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod state;
mod ui;
mod util;
mod viewer;

use std::path::PathBuf;

use app::SpecmapApp;
use eframe::egui;
use specmap_core::SessionConfig;

fn main() -> eframe::Result<()> {
    env_logger::init();
    // optional map to open on start
    let initial_map = std::env::args_os().nth(1).map(PathBuf::from);
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Specmap",
        opts,
        Box::new(move |cc| {
            ui::theme::configure_style(&cc.egui_ctx);
            let mut app = SpecmapApp::new(&SessionConfig::default());
            if let Some(path) = initial_map {
                app.load_map(path);
            }
            Ok(Box::new(app))
        }),
    )
}
