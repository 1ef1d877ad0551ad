//! Bottom status bar: module counts, selected module, and feedback.

use crate::app::ErrorLookupApp;
use crate::ui::theme;
use crate::util::time::format_status_time;

impl ErrorLookupApp {
    /// Render the status bar at the bottom of the window.
    ///
    /// Shows: loaded/total modules | selected module | input error or
    /// transient message, with the lookup time and database on the right.
    pub fn render_status_bar(&self, ui: &mut egui::Ui) {
        let dark = self.settings.dark_mode;
        ui.horizontal_centered(|ui| {
            // ── Module count ────────────────────────────────────────
            let count_text = format!(
                "{} of {} modules loaded",
                self.modules.loaded_count(),
                self.modules.len()
            );
            ui.label(egui::RichText::new(count_text).color(theme::text_secondary(dark)));

            ui.separator();

            if let Some(label) = self.selected_module_label() {
                ui.label(egui::RichText::new(label).color(theme::accent(dark)));
                ui.separator();
            }

            // ── Input error / status message ────────────────────────
            if let Some(err) = &self.input_error {
                ui.label(egui::RichText::new(err).color(theme::warning(dark)));
            } else if let Some((msg, _)) = &self.status_message {
                ui.label(egui::RichText::new(msg).color(theme::text_secondary(dark)));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(self.database_source.to_string())
                        .color(theme::text_dim(dark))
                        .small(),
                );
                if let Some(result) = &self.result {
                    ui.label(
                        egui::RichText::new(format_status_time(&result.looked_up_at))
                            .color(theme::text_dim(dark))
                            .small(),
                    );
                }
            });
        });
    }
}
