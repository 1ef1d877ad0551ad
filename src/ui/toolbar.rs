//! Top toolbar: code field, step buttons, and the Modules, Settings and
//! Export menus.

use crate::app::ErrorLookupApp;
use crate::app_actions::ExportFormat;
use crate::core::module_set::ModuleState;
use crate::ui::theme;
use crate::util::constants;

impl ErrorLookupApp {
    /// Render the top toolbar within the given `Ui` region.
    pub fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_centered(|ui| {
            ui.spacing_mut().item_spacing.x = 8.0;

            // ── Code field ──────────────────────────────────────────
            ui.label("Code:");
            let field = ui.add(
                egui::TextEdit::singleline(&mut self.code_input)
                    .id(crate::app_actions::code_field_id())
                    .desired_width(140.0)
                    .font(egui::TextStyle::Monospace)
                    .hint_text(constants::DEFAULT_CODE),
            );
            if field.changed() {
                self.refresh_lookup();
            }
            field.on_hover_text(
                "Decimal, negative decimal, or hex (0x prefix optional).\n\
                 Up/Down step by one, Page Up/Down by 0x10.",
            );

            if ui.small_button("-").on_hover_text("Previous code").clicked() {
                self.step(-1);
            }
            if ui.small_button("+").on_hover_text("Next code").clicked() {
                self.step(1);
            }

            ui.separator();

            self.render_modules_menu(ui);
            self.render_settings_menu(ui);

            // ── Export dropdown ──────────────────────────────────────
            ui.menu_button("Export", |ui| {
                let enabled = self.result.is_some();
                if ui
                    .add_enabled(enabled, egui::Button::new("Export to CSV..."))
                    .clicked()
                {
                    self.export(ExportFormat::Csv);
                    ui.close_menu();
                }
                if ui
                    .add_enabled(enabled, egui::Button::new("Export to JSON..."))
                    .clicked()
                {
                    self.export(ExportFormat::Json);
                    ui.close_menu();
                }
            });

            // ── Right-aligned app title + about + theme toggle ─────────
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let about_btn = ui.add(
                    egui::Button::new(egui::RichText::new("ℹ").size(14.0))
                        .min_size(egui::vec2(22.0, 22.0)),
                );
                if about_btn
                    .on_hover_text(format!("About {}", constants::APP_NAME))
                    .clicked()
                {
                    self.show_about = true;
                }

                let dark = self.settings.dark_mode;
                let theme_icon = if dark { "☀" } else { "🌙" };
                let theme_tooltip = if dark {
                    "Switch to light mode"
                } else {
                    "Switch to dark mode"
                };
                let theme_btn = ui.add(
                    egui::Button::new(egui::RichText::new(theme_icon).size(14.0))
                        .min_size(egui::vec2(22.0, 22.0)),
                );
                if theme_btn.on_hover_text(theme_tooltip).clicked() {
                    self.settings.dark_mode = !dark;
                    if self.settings.dark_mode {
                        theme::apply_dark_theme(ui.ctx());
                    } else {
                        theme::apply_light_theme(ui.ctx());
                    }
                }

                ui.label(
                    egui::RichText::new(constants::APP_NAME)
                        .color(theme::accent(self.settings.dark_mode))
                        .strong()
                        .size(16.0),
                );
            });
        });
    }

    /// One checkbox per database module. Unavailable modules are greyed
    /// but stay toggleable so the load can be retried; hover shows the error.
    fn render_modules_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("Modules", |ui| {
            if self.modules.is_empty() {
                ui.label(
                    egui::RichText::new("No modules")
                        .color(theme::text_dim(self.settings.dark_mode))
                        .italics(),
                );
                return;
            }

            let dark = self.settings.dark_mode;
            let mut toggled = None;
            egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                for (i, entry) in self.modules.entries().iter().enumerate() {
                    let mut checked = entry.is_enabled();
                    let mut label = egui::RichText::new(&entry.descriptor.text);
                    if matches!(entry.state, ModuleState::Unavailable(_)) {
                        label = label.color(theme::text_dim(dark)).italics();
                    }
                    let response = ui.checkbox(&mut checked, label);
                    let response = match &entry.state {
                        ModuleState::Unavailable(err) => response.on_hover_text(format!(
                            "{}\nNot loaded: {err}",
                            entry.descriptor.path
                        )),
                        _ => response.on_hover_text(&entry.descriptor.path),
                    };
                    if response.changed() {
                        toggled = Some(i);
                    }
                }
            });

            if let Some(i) = toggled {
                self.toggle_module(i);
            }
        });
    }

    fn render_settings_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("Settings", |ui| {
            let mut on_top = self.settings.always_on_top;
            if ui.checkbox(&mut on_top, "Always on top").changed() {
                self.toggle_always_on_top(ui.ctx());
            }

            if ui.button("Message language...").clicked() {
                self.lang_input = format!("0x{:04X}", self.settings.lang_id);
                self.show_language = true;
                ui.close_menu();
            }

            ui.separator();

            if ui.button("Open database...").clicked() {
                self.open_database_dialog();
                ui.close_menu();
            }
            let external = self.settings.database_path.is_some();
            if ui
                .add_enabled(external, egui::Button::new("Use bundled database"))
                .clicked()
            {
                self.use_bundled_database();
                ui.close_menu();
            }
        });
    }
}
