//! Left-hand list of modules that had a message for the current code.
//!
//! Uses `egui_extras::TableBuilder` so long module lists scroll without
//! laying out hidden rows.

use crate::app::ErrorLookupApp;
use crate::ui::theme;
use crate::util::constants::MATCH_ROW_HEIGHT;
use egui_extras::{Column, TableBuilder};

impl ErrorLookupApp {
    /// Render the match list. Clicking a row selects it; hovering shows
    /// the module, its path, and the message.
    pub fn render_match_list(&mut self, ui: &mut egui::Ui) {
        let dark = self.settings.dark_mode;
        let Some(result) = &self.result else {
            ui.label(egui::RichText::new("Enter a code").color(theme::text_dim(dark)));
            return;
        };

        if result.matches.is_empty() {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("No description found")
                    .color(theme::text_dim(dark))
                    .italics(),
            );
            return;
        }

        let severity_color = theme::severity_color(result.fields.severity, dark);
        let mut clicked = None;

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().clip(true))
            .sense(egui::Sense::click())
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.label(
                        egui::RichText::new(format!("Modules ({})", result.matches.len()))
                            .color(theme::text_secondary(dark))
                            .strong(),
                    );
                });
            })
            .body(|body| {
                body.rows(MATCH_ROW_HEIGHT, result.matches.len(), |mut row| {
                    let i = row.index();
                    let Some(m) = result.matches.get(i) else {
                        return;
                    };
                    row.set_selected(self.selected_match == Some(i));

                    row.col(|ui| {
                        ui.label(egui::RichText::new(&m.module).color(severity_color));
                    });

                    let response = row.response();
                    let response = match result.tooltip(i) {
                        Some(tip) => response.on_hover_text(tip),
                        None => response,
                    };
                    if response.clicked() {
                        clicked = Some(i);
                    }
                });
            });

        if clicked.is_some() {
            self.selected_match = clicked;
        }
    }
}
