//! Control panel (left sidebar) and status bar rendering.

use eframe::egui::{self, FontFamily, FontId, Stroke};
use rfd::FileDialog;
use specmap_core::{CalibrationEngine, Colormap, Event, CENTER_PRESETS};

use super::theme::{accent, form_label, primary_button, ThemeColors};
use crate::app::SpecmapApp;
use crate::util::file_label;

const DATA_EXTENSIONS: &[&str] = &["txt", "csv", "dat", "asc"];

impl SpecmapApp {
    /// Render the left panel with data, calibration, plot and export sections.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        let colors = ThemeColors::from_ctx(ctx);

        egui::SidePanel::left("ctrl")
            .default_width(260.0)
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_panel)
                    .inner_margin(egui::Margin::ZERO),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_section(ui, "Data", |app, ui| app.render_data_controls(ui));
                        self.render_section(ui, "Calibration", |app, ui| {
                            app.render_calibration_controls(ui);
                        });
                        self.render_section(ui, "Plot", |app, ui| app.render_plot_controls(ui));
                        self.render_section(ui, "Export", |app, ui| {
                            app.render_export_controls(ui);
                        });
                        ui.add_space(12.0);
                    });
            });
    }

    /// Render a section with an uppercase header and separator.
    fn render_section<F>(&mut self, ui: &mut egui::Ui, title: &str, content: F)
    where
        F: FnOnce(&mut Self, &mut egui::Ui),
    {
        ui.push_id(title, |ui| {
            let colors = ThemeColors::from_ui(ui);
            let header_height = ui.spacing().interact_size.y.max(28.0);
            let (header_rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), header_height),
                egui::Sense::hover(),
            );
            ui.painter().rect_filled(header_rect, 0.0, colors.bg_header);
            ui.painter().text(
                header_rect.left_center() + egui::vec2(16.0, 0.0),
                egui::Align2::LEFT_CENTER,
                title.to_uppercase(),
                FontId::new(11.0, FontFamily::Proportional),
                colors.text_primary,
            );
            ui.painter().hline(
                header_rect.x_range(),
                header_rect.bottom(),
                Stroke::new(1.0, colors.border),
            );

            egui::Frame::none()
                .inner_margin(egui::Margin {
                    left: 16.0,
                    right: 16.0,
                    top: 12.0,
                    bottom: 16.0,
                })
                .show(ui, |ui| content(self, ui));
        });
    }

    fn render_data_controls(&mut self, ui: &mut egui::Ui) {
        let session = self.controller.session();
        let start_dir = session.source_folder().to_path_buf();
        let map_label = match session.map() {
            Some(map) => format!(
                "{} ({} x {})",
                file_label(session.map_path()),
                map.row_count(),
                map.channel_count()
            ),
            None => "No map loaded".to_string(),
        };
        let reference_label = match session.reference() {
            Some(r) => format!(
                "{} ({} ch)",
                file_label(session.reference_path()),
                r.channel_count()
            ),
            None => "No reference loaded".to_string(),
        };

        ui.label(form_label("Map"));
        ui.label(map_label);
        if ui.button("Open map...").clicked() {
            if let Some(path) = FileDialog::new()
                .add_filter("Spectral map", DATA_EXTENSIONS)
                .set_directory(&start_dir)
                .pick_file()
            {
                self.load_map(path);
            }
        }

        ui.add_space(8.0);
        ui.label(form_label("Reference"));
        ui.label(reference_label);
        if ui.button("Open reference...").clicked() {
            if let Some(path) = FileDialog::new()
                .add_filter("Reference spectrum", DATA_EXTENSIONS)
                .set_directory(&start_dir)
                .pick_file()
            {
                self.load_reference(path);
            }
        }

        ui.add_space(4.0);
        ui.label(
            egui::RichText::new("Drop files on the upper plot for maps, lower plot for references")
                .size(10.0)
                .weak(),
        );
    }

    fn render_calibration_controls(&mut self, ui: &mut egui::Ui) {
        let engine = self.controller.engine();
        let dimensions = engine.dimensions().to_vec();
        let materials = engine.materials().to_vec();
        let functions = engine.functions().to_vec();
        let can_calibrate = self.controller.session().can_calibrate();
        let draft = self.controller.session_mut().draft_mut();

        ui.label(form_label("Center (nm)"));
        ui.horizontal(|ui| {
            let mut center = draft.center.unwrap_or(CENTER_PRESETS[1]);
            egui::ComboBox::from_id_salt("center_preset")
                .selected_text(format!("{center:.0}"))
                .width(70.0)
                .show_ui(ui, |ui| {
                    for preset in CENTER_PRESETS {
                        ui.selectable_value(&mut center, preset, format!("{preset:.0}"));
                    }
                });
            ui.add(egui::DragValue::new(&mut center).speed(1.0).range(0.0..=5000.0));
            draft.center = Some(center);
        });

        ui.add_space(6.0);
        ui.label(form_label("Dimension"));
        egui::ComboBox::from_id_salt("dimension")
            .selected_text(draft.dimension.map_or_else(|| "-".into(), |d| d.to_string()))
            .width(ui.available_width() - 8.0)
            .show_ui(ui, |ui| {
                for d in dimensions {
                    ui.selectable_value(&mut draft.dimension, Some(d), d.to_string());
                }
            });

        ui.add_space(6.0);
        ui.label(form_label("Material"));
        egui::ComboBox::from_id_salt("material")
            .selected_text(draft.material.clone().unwrap_or_else(|| "-".into()))
            .width(ui.available_width() - 8.0)
            .show_ui(ui, |ui| {
                for m in materials {
                    let label = m.clone();
                    ui.selectable_value(&mut draft.material, Some(m), label);
                }
            });

        ui.add_space(6.0);
        ui.label(form_label("Function"));
        egui::ComboBox::from_id_salt("function")
            .selected_text(draft.function.clone().unwrap_or_else(|| "-".into()))
            .width(ui.available_width() - 8.0)
            .show_ui(ui, |ui| {
                for f in functions {
                    let label = f.clone();
                    ui.selectable_value(&mut draft.function, Some(f), label);
                }
            });

        ui.add_space(6.0);
        ui.label(form_label("Search width (ch)"));
        let mut width = draft.search_width.unwrap_or(specmap_core::DEFAULT_SEARCH_WIDTH);
        ui.add(egui::DragValue::new(&mut width).speed(0.5).range(0.5..=500.0));
        draft.search_width = Some(width);

        ui.add_space(10.0);
        if ui
            .add_enabled(can_calibrate, primary_button("Calibrate"))
            .on_disabled_hover_text("Load a reference spectrum first")
            .clicked()
        {
            self.calibrate();
        }

        let descriptor = self.controller.session().calibration_descriptor();
        if !descriptor.is_empty() {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(descriptor).size(10.0).color(accent::GREEN));
        }
    }

    fn render_plot_controls(&mut self, ui: &mut egui::Ui) {
        let display = *self.controller.session().display();

        ui.label(form_label("Color range"));
        ui.horizontal(|ui| {
            let range = &mut self.ui_state.color_range;
            ui.add(egui::DragValue::new(&mut range.min).prefix("min "));
            ui.add(egui::DragValue::new(&mut range.max).prefix("max "));
        });
        if ui.button("Apply").clicked() {
            self.dispatch(Event::ApplyColorRange(self.ui_state.color_range));
        }

        ui.add_space(8.0);
        ui.label(form_label("Colormap"));
        let mut colormap = display.colormap;
        egui::ComboBox::from_id_salt("colormap_select")
            .selected_text(colormap.to_string())
            .width(ui.available_width() - 8.0)
            .show_ui(ui, |ui| {
                for cmap in Colormap::ALL {
                    ui.selectable_value(&mut colormap, cmap, cmap.to_string());
                }
            });
        if colormap != display.colormap {
            self.dispatch(Event::SetColormap(colormap));
        }

        ui.add_space(8.0);
        let mut autoscale = display.autoscale;
        if ui.checkbox(&mut autoscale, "Autoscale").changed() {
            self.dispatch(Event::SetAutoscale(autoscale));
        }
    }

    fn render_export_controls(&mut self, ui: &mut egui::Ui) {
        let has_map = self.controller.session().map().is_some();
        let rows = self.controller.session().queue().rows().to_vec();

        ui.label(form_label(&format!("Queue ({})", rows.len())));
        egui::Frame::none()
            .stroke(Stroke::new(1.0, ThemeColors::from_ui(ui).border))
            .inner_margin(egui::Margin::same(4.0))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(160.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for (position, row) in rows.iter().enumerate() {
                            let selected = self.ui_state.selected.contains(&position);
                            if ui
                                .selectable_label(selected, format!("{position:>4}  row {row}"))
                                .clicked()
                            {
                                if selected {
                                    self.ui_state.selected.remove(&position);
                                } else {
                                    self.ui_state.selected.insert(position);
                                }
                            }
                        }
                    });
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.add_enabled_ui(has_map, |ui| {
                if ui.button("Add").clicked() {
                    self.dispatch(Event::AddCurrent);
                }
                if ui.button("Add all").clicked() {
                    self.add_all_rows();
                }
            });
            if ui.button("Delete").clicked() {
                self.delete_selected();
            }
        });

        ui.add_space(8.0);
        if ui
            .add_enabled(!rows.is_empty(), primary_button("Export..."))
            .clicked()
        {
            self.export_queue();
        }
    }

    /// Render the bottom status bar.
    pub(crate) fn render_bottom_panel(&self, ctx: &egui::Context) {
        let colors = ThemeColors::from_ctx(ctx);

        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::none()
                    .fill(colors.bg_header)
                    .inner_margin(egui::Margin {
                        left: 16.0,
                        right: 16.0,
                        top: 6.0,
                        bottom: 6.0,
                    }),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let colors = ThemeColors::from_ui(ui);
                    let status_color = if self.status.is_error {
                        accent::RED
                    } else {
                        accent::GREEN
                    };
                    ui.label(egui::RichText::new("●").size(11.0).color(status_color));
                    ui.label(
                        egui::RichText::new(&self.status.text)
                            .size(11.0)
                            .color(status_color),
                    );

                    if let Some(row) = self.controller.session().current_row() {
                        ui.label(egui::RichText::new("│").size(11.0).color(colors.text_dim));
                        ui.label(
                            egui::RichText::new(format!("row {row}"))
                                .size(11.0)
                                .color(colors.text_muted),
                        );
                    }
                });
            });
    }
}
