//! Control panel (left sidebar) rendering.

use eframe::egui;

use super::theme::{accent, danger_button, form_label, primary_button, stat_label, stat_value};
use crate::app::CalibratorApp;
use crate::util::format_multiplier;

impl CalibratorApp {
    /// Render the left sidebar: prompt, multiplier checklist and ring summary.
    pub(crate) fn render_control_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("ctrl")
            .default_width(240.0)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add_space(8.0);
                        ui.heading("RINGCAL");
                        ui.label(egui::RichText::new(self.image.file_name()).weak());
                        ui.separator();

                        self.render_prompt(ui);
                        ui.separator();
                        self.render_multipliers(ui);
                        ui.separator();
                        self.render_summary(ui);

                        ui.add_space(12.0);
                        let enabled = !self.session.is_complete();
                        if ui.add_enabled(enabled, danger_button("Cancel")).clicked() {
                            self.ui_state.cancel_requested = true;
                        }
                        ui.label(egui::RichText::new("Esc / Q to cancel").small().weak());
                    });
            });
    }

    fn render_prompt(&self, ui: &mut egui::Ui) {
        ui.label(form_label("Status"));
        match self.session.state().prompt() {
            Some(prompt) => {
                ui.label(egui::RichText::new(prompt).color(accent::BLUE).strong());
            }
            None => {
                ui.label(egui::RichText::new("Calibration complete").color(accent::GREEN).strong());
            }
        }
        if let Some((x, y)) = self.ui_state.cursor {
            ui.label(egui::RichText::new(format!("Pointer: ({x}, {y})")).small().weak());
        }
    }

    fn render_multipliers(&mut self, ui: &mut egui::Ui) {
        ui.label(form_label("Ring multipliers"));
        let enabled = !self.session.is_complete();
        ui.add_enabled_ui(enabled, |ui| {
            for choice in &mut self.multipliers.choices {
                ui.checkbox(&mut choice.checked, format_multiplier(choice.value));
            }

            ui.horizontal(|ui| {
                let field = ui.add(
                    egui::TextEdit::singleline(&mut self.multipliers.custom_input)
                        .desired_width(80.0)
                        .hint_text("custom"),
                );
                let submitted =
                    field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.add(primary_button("Add")).clicked() || submitted {
                    self.ui_state.custom_error = self.multipliers.add_custom().err();
                }
            });
            if let Some(error) = &self.ui_state.custom_error {
                ui.label(egui::RichText::new(error).color(accent::RED).small());
            }
        });
    }

    fn render_summary(&self, ui: &mut egui::Ui) {
        ui.label(form_label("Rings"));
        let Some(calibration) = self.session.calibration() else {
            ui.label(stat_label("None yet"));
            return;
        };

        egui::Grid::new("base_circle")
            .num_columns(2)
            .spacing(egui::vec2(8.0, 2.0))
            .show(ui, |ui| {
                ui.label(stat_label("Center"));
                ui.label(stat_value(&calibration.base.center.to_string()));
                ui.end_row();
                ui.label(stat_label("Radius"));
                ui.label(stat_value(&calibration.base.radius.to_string()));
                ui.end_row();
            });

        if calibration.rings.is_empty() {
            ui.label(stat_label("No multipliers selected"));
            return;
        }
        egui::Grid::new("ring_list")
            .num_columns(2)
            .spacing(egui::vec2(8.0, 2.0))
            .show(ui, |ui| {
                for ring in &calibration.rings {
                    ui.label(stat_label(&format_multiplier(ring.multiplier)));
                    ui.label(stat_value(&ring.radius.to_string()));
                    ui.end_row();
                }
            });
    }
}
