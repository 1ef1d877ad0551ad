//! Central panel: code summary and the selected module's message.

use crate::app::ErrorLookupApp;

impl ErrorLookupApp {
    /// Render the description as selectable, read-only text.
    pub fn render_description_panel(&mut self, ui: &mut egui::Ui) {
        let mut text = self.description_text();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY)
                        .desired_rows(12)
                        .interactive(true)
                        .frame(false),
                );
            });
    }
}
