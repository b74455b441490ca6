//! Main view (central panel) rendering: 2D map above, 1D plot below.

use eframe::egui;
use egui_plot::{
    HLine, Legend, Line, Plot, PlotImage, PlotPoint, PlotPoints, PlotResponse, PlotUi, Points,
};

use super::theme::{accent, ThemeColors};
use crate::app::SpecmapApp;
use crate::state::{LineBounds, PlotContent};
use crate::util::{f64_to_f32, usize_to_f64};

const INTENSITY: &str = "Intensity";

impl SpecmapApp {
    /// Render the central panel with the map and the 1D plot.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        self.ensure_texture(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.view.canvas = Some(ui.max_rect());
            let spacing = ui.spacing().item_spacing.y;
            let half = ((ui.available_height() - spacing) / 2.0).max(50.0);
            self.render_map_plot(ui, half);
            self.render_line_plot(ui, half);
        });
    }

    fn x_axis_label(&self) -> &'static str {
        if self.controller.session().status().is_calibrated() {
            "Wavelength (nm)"
        } else {
            "Channel"
        }
    }

    fn render_map_plot(&mut self, ui: &mut egui::Ui, height: f32) {
        let session = self.controller.session();
        let (Some(tex), Some(map)) = (&self.view.map_texture, session.map()) else {
            ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
                ui.centered_and_justified(|ui| ui.label("Drop a spectral map here"));
            });
            return;
        };

        let rows = map.row_count();
        let channels = map.channel_count();
        let (lo, hi) = session.axis().bounds().unwrap_or((0.0, 1.0));
        let step = if channels > 1 {
            (hi - lo) / usize_to_f64(channels - 1)
        } else {
            1.0
        };
        let center = PlotPoint::new((lo + hi) / 2.0, (usize_to_f64(rows) - 1.0) / 2.0);
        let size = egui::vec2(
            f64_to_f32(step * usize_to_f64(channels)),
            f64_to_f32(usize_to_f64(rows)),
        );
        let marker = self.view.marker;

        let response = Plot::new("map")
            .height(height)
            .x_axis_label(self.x_axis_label())
            .y_axis_label("Row")
            .allow_double_click_reset(true)
            .show(ui, |plot_ui| {
                plot_ui.image(PlotImage::new(tex.id(), center, size));
                if let Some(row) = marker {
                    plot_ui.hline(HLine::new(usize_to_f64(row)).color(accent::BLUE).width(1.5));
                }
                plot_ui.pointer_coordinate()
            });

        if response.response.clicked() {
            if let Some(point) = response.inner {
                self.dispatch(specmap_core::Event::PlotClick { y: point.y });
            }
        }
    }

    fn render_line_plot(&mut self, ui: &mut egui::Ui, height: f32) {
        let bounds = std::mem::take(&mut self.view.line_bounds);
        let session = self.controller.session();
        let axis = session.axis().values();
        let x_label = self.x_axis_label();

        match self.view.plot {
            PlotContent::Empty => {
                show_line_plot(ui, height, bounds, ["", ""], |_| {});
            }
            PlotContent::Spectrum(row) => {
                let Some(values) = session.map().and_then(|m| m.row(row)) else {
                    return;
                };
                let points: Vec<[f64; 2]> =
                    axis.iter().zip(values.iter()).map(|(&x, &y)| [x, y]).collect();
                show_line_plot(ui, height, bounds, [x_label, INTENSITY], |plot_ui| {
                    plot_ui.line(Line::new(PlotPoints::from(points)).name(format!("row {row}")));
                });
            }
            PlotContent::Reference => {
                let Some(reference) = session.reference() else {
                    return;
                };
                let values = reference.values();
                let use_axis = axis.len() == values.len();
                let points: Vec<[f64; 2]> = values
                    .iter()
                    .enumerate()
                    .map(|(i, &y)| [if use_axis { axis[i] } else { usize_to_f64(i) }, y])
                    .collect();
                let color = ThemeColors::from_ui(ui).text_primary;
                let label = if use_axis { x_label } else { "Channel" };
                show_line_plot(ui, height, bounds, [label, INTENSITY], |plot_ui| {
                    plot_ui.line(
                        Line::new(PlotPoints::from(points))
                            .color(color)
                            .name("reference"),
                    );
                });
            }
            PlotContent::FitResult => {
                let Some(fit) = session.last_fit() else {
                    return;
                };
                let curve: Vec<[f64; 2]> = axis
                    .iter()
                    .enumerate()
                    .map(|(i, &w)| [usize_to_f64(i), w])
                    .collect();
                let peaks: Vec<[f64; 2]> =
                    fit.peaks.iter().map(|p| [p.channel, p.wavelength]).collect();
                let title = format!("rms {:.4} nm", fit.rms);
                let labels = ["Channel", "Wavelength (nm)"];
                show_line_plot(ui, height, bounds, labels, |plot_ui| {
                    plot_ui.line(Line::new(PlotPoints::from(curve)).name("dispersion"));
                    plot_ui.points(
                        Points::new(PlotPoints::from(peaks))
                            .radius(4.0)
                            .color(accent::GREEN)
                            .name(title),
                    );
                });
            }
        }
    }

    /// Highlight the drop zone under the pointer while files hover the window.
    pub(crate) fn render_drop_overlay(&self, ctx: &egui::Context) {
        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let Some(canvas) = self.view.canvas else {
            return;
        };
        let geometry = self
            .controller
            .drop_geometry()
            .with_canvas(f64::from(canvas.top()), f64::from(canvas.height()));
        let split = f64_to_f32(
            geometry.chrome_offset + geometry.threshold * geometry.canvas_height * geometry.scale,
        )
        .clamp(canvas.top(), canvas.bottom());
        let upper = egui::Rect::from_min_max(canvas.min, egui::pos2(canvas.right(), split));
        let lower = egui::Rect::from_min_max(egui::pos2(canvas.left(), split), canvas.max);

        let over_lower = self.view.drag_pos.is_some_and(|p| p.y > split);
        let (active, label) = if over_lower {
            (lower, "Load reference")
        } else {
            (upper, "Load map")
        };

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("drop_overlay"),
        ));
        painter.rect_filled(active, 4.0, accent::BLUE.gamma_multiply(0.25));
        painter.text(
            active.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(20.0),
            egui::Color32::WHITE,
        );
    }
}

/// Show the 1D plot, applying a pending limit update.
///
/// `Refit` forgets the remembered limits so they fit what `add_contents`
/// draws. `Freeze` turns auto-fitting off so the current limits survive a
/// line replacement.
fn show_line_plot<R>(
    ui: &mut egui::Ui,
    height: f32,
    bounds: LineBounds,
    [x_label, y_label]: [&str; 2],
    add_contents: impl FnOnce(&mut PlotUi) -> R,
) -> PlotResponse<R> {
    let mut plot = Plot::new("line").height(height).legend(Legend::default());
    if !x_label.is_empty() {
        plot = plot.x_axis_label(x_label);
    }
    if !y_label.is_empty() {
        plot = plot.y_axis_label(y_label);
    }
    if bounds == LineBounds::Refit {
        plot = plot.reset();
    }
    plot.show(ui, |plot_ui| {
        if bounds == LineBounds::Freeze {
            plot_ui.set_auto_bounds(egui::Vec2b::FALSE);
        }
        add_contents(plot_ui)
    })
}
