//! Main application state and logic.
//!
//! Contains the `SpecmapApp` struct, which owns the session controller,
//! turns egui input into session events, and applies the returned render
//! commands to the retained view state.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use eframe::egui;
use log::{debug, warn};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use specmap_algorithms::LampCalibrator;
use specmap_core::{
    CalibrationError, Controller, DropTarget, Error, Event, ExportSummary, FitFailure, Key,
    RenderCommand, SessionConfig, SpectrumDraw,
};
use specmap_io::TextLoader;

use crate::state::{LineBounds, PlotContent, StatusState, UiState, ViewState};
use crate::viewer::generate_map_image;

/// Main application state.
pub struct SpecmapApp {
    /// Session plus loader and calibration engine.
    pub(crate) controller: Controller<TextLoader, LampCalibrator>,
    /// Retained render state.
    pub(crate) view: ViewState,
    /// Side panel edit buffers.
    pub(crate) ui_state: UiState,
    /// Status bar message.
    pub(crate) status: StatusState,
}

impl SpecmapApp {
    /// Create the application with a fresh session.
    pub fn new(config: &SessionConfig) -> Self {
        let controller = Controller::new(config, TextLoader, LampCalibrator::default());
        let ui_state = UiState {
            color_range: controller.session().display().color_range,
            ..UiState::default()
        };
        Self {
            controller,
            view: ViewState::default(),
            ui_state,
            status: StatusState::default(),
        }
    }

    /// Load a spectral map.
    pub fn load_map(&mut self, path: PathBuf) {
        if self.dispatch(Event::LoadMap(path)) {
            self.report_map_loaded();
        }
    }

    /// Load a reference spectrum.
    pub fn load_reference(&mut self, path: PathBuf) {
        if self.dispatch(Event::LoadReference(path)) {
            self.report_reference_loaded();
        }
    }

    /// Apply an event to the session and execute the resulting commands.
    ///
    /// Returns `true` if the event succeeded.
    pub(crate) fn dispatch(&mut self, event: Event) -> bool {
        match self.controller.handle(event) {
            Ok(commands) => {
                self.execute(commands);
                true
            }
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Apply render commands to the retained view state.
    pub(crate) fn execute(&mut self, commands: Vec<RenderCommand>) {
        for command in commands {
            match command {
                RenderCommand::Spectrum { row, draw } => {
                    self.view.plot = PlotContent::Spectrum(row);
                    let update = match draw {
                        SpectrumDraw::FullRedraw => LineBounds::Refit,
                        SpectrumDraw::ReplaceLine => LineBounds::Freeze,
                    };
                    self.view.line_bounds = self.view.line_bounds.then(update);
                }
                RenderCommand::Reference => {
                    self.view.plot = PlotContent::Reference;
                    self.view.line_bounds = LineBounds::Refit;
                }
                RenderCommand::FitResult => {
                    self.view.plot = PlotContent::FitResult;
                    self.view.line_bounds = LineBounds::Refit;
                }
                RenderCommand::Map {
                    range,
                    colormap,
                    marker,
                } => {
                    self.view.map_style = Some((range, colormap));
                    self.view.map_texture = None;
                    self.view.marker = marker;
                    self.ui_state.color_range = range;
                }
                RenderCommand::RowMarker(row) => self.view.marker = Some(row),
            }
        }
    }

    /// Regenerate the map texture if it was invalidated.
    pub(crate) fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.view.map_texture.is_some() {
            return;
        }
        let (Some(map), Some((range, colormap))) =
            (self.controller.session().map(), self.view.map_style)
        else {
            return;
        };
        let img = generate_map_image(map, range, colormap);
        self.view.map_texture = Some(ctx.load_texture("map", img, egui::TextureOptions::NEAREST));
    }

    fn report(&mut self, err: &Error) {
        warn!("{err}");
        match err {
            Error::Calibration(CalibrationError::Fit(FitFailure::PeaksNotFound { .. })) => {
                show_error("Peaks not found.");
            }
            Error::Calibration(e) => show_error(&e.to_string()),
            _ => {}
        }
        self.status.set_error(err.to_string());
    }

    fn report_map_loaded(&mut self) {
        let session = self.controller.session();
        if let Some(map) = session.map() {
            let name = crate::util::file_label(session.map_path());
            self.status.set(format!(
                "Loaded {name}: {} rows x {} channels",
                map.row_count(),
                map.channel_count()
            ));
        }
    }

    fn report_reference_loaded(&mut self) {
        let session = self.controller.session();
        let name = crate::util::file_label(session.reference_path());
        let material = session.draft().material.as_deref().unwrap_or("-");
        self.status
            .set(format!("Loaded reference {name} (material {material})"));
    }

    /// Run a calibration with the current parameter choices.
    pub(crate) fn calibrate(&mut self) {
        if self.dispatch(Event::Calibrate) {
            let descriptor = self.controller.session().calibration_descriptor();
            self.status.set(format!("Calibrated: {descriptor}"));
        }
    }

    /// Queue every map row. The old queue positions are gone, so the list
    /// selection is cleared.
    pub(crate) fn add_all_rows(&mut self) {
        if self.dispatch(Event::AddAll) {
            self.ui_state.selected.clear();
        }
    }

    /// Remove the selected queue positions after confirmation.
    pub(crate) fn delete_selected(&mut self) {
        let positions: Vec<usize> = self.ui_state.selected.iter().copied().collect();
        let removed = self
            .controller
            .session_mut()
            .delete_queued(&positions, confirm);
        if removed > 0 {
            self.ui_state.selected.clear();
            self.status.set(format!("Removed {removed} queued rows"));
        }
    }

    /// Ask for a destination folder and export the queue into it.
    pub(crate) fn export_queue(&mut self) {
        if self.controller.session().queue().is_empty() {
            self.status.set("Nothing queued for export");
            return;
        }
        let destination = rfd::FileDialog::new()
            .set_directory(self.controller.session().source_folder())
            .pick_folder();
        match self.run_export(destination.as_deref()) {
            Ok(summary) if summary.written.is_empty() => {}
            Ok(summary) => {
                let mut text = format!("Exported {} spectra", summary.written.len());
                if summary.overwritten > 0 {
                    text.push_str(&format!(" ({} overwritten)", summary.overwritten));
                }
                self.status.set(text);
            }
            Err(e) => {
                warn!("{e:#}");
                self.status.set_error(format!("{e:#}"));
            }
        }
    }

    fn run_export(&self, destination: Option<&Path>) -> anyhow::Result<ExportSummary> {
        let summary = self
            .controller
            .export(destination)
            .context("export failed")?;
        Ok(summary)
    }

    /// Route files dropped on the window to the map or reference loader.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (dropped, hovering, pointer) = ctx.input(|i| {
            (
                i.raw.dropped_files.clone(),
                !i.raw.hovered_files.is_empty(),
                i.pointer.latest_pos(),
            )
        });
        if hovering {
            self.view.drag_pos = pointer.or(self.view.drag_pos);
        }
        if dropped.is_empty() {
            if !hovering {
                self.view.drag_pos = None;
            }
            return;
        }

        if let Some(canvas) = self.view.canvas {
            let geometry = self
                .controller
                .drop_geometry()
                .with_canvas(f64::from(canvas.top()), f64::from(canvas.height()));
            self.controller.set_drop_geometry(geometry);
        }
        let drop_y = match drop_position(pointer, self.view.drag_pos.take()) {
            Some(pos) => f64::from(pos.y),
            None => {
                debug!("no pointer position for file drop, loading as map");
                0.0
            }
        };
        let target = self.controller.drop_geometry().classify(drop_y, 0.0);
        for file in dropped {
            let Some(path) = file.path else {
                continue;
            };
            if self.dispatch(Event::Drop {
                path,
                drop_y,
                window_top: 0.0,
            }) {
                match target {
                    DropTarget::MapData => self.report_map_loaded(),
                    DropTarget::Reference => self.report_reference_loaded(),
                }
            }
        }
    }

    /// Arrow keys step the cursor; Enter redraws the map.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (up, down, enter) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowUp),
                i.key_pressed(egui::Key::ArrowDown),
                i.key_pressed(egui::Key::Enter),
            )
        });
        if up {
            self.dispatch(Event::Key(Key::Up));
        }
        if down {
            self.dispatch(Event::Key(Key::Down));
        }
        if enter {
            self.dispatch(Event::Key(Key::Enter));
        }
    }
}

impl eframe::App for SpecmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.handle_keys(ctx);
        self.render_side_panel(ctx);
        self.render_bottom_panel(ctx);
        self.render_central_panel(ctx);
        self.render_drop_overlay(ctx);
    }
}

/// Where a drop landed: the pointer on the drop frame, else the last
/// position seen while the files hovered.
fn drop_position(pointer: Option<egui::Pos2>, hovered: Option<egui::Pos2>) -> Option<egui::Pos2> {
    pointer.or(hovered)
}

/// Blocking yes/no confirmation.
fn confirm(prompt: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Confirm")
        .set_description(prompt)
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}

/// Blocking error dialog.
fn show_error(message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
