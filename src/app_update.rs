//! Frame-by-frame update loop.
//!
//! Contains the [`eframe::App`] implementation for `ErrorLookupApp`: it
//! drains background-dialog channels, handles shortcuts, and lays out the
//! panels.

use crate::app::ErrorLookupApp;
use crate::util::constants;

impl eframe::App for ErrorLookupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. Background dialog results
        self.process_export_messages();
        self.process_database_selection();

        // 2. Keep repainting while a dialog thread is pending or a status
        //    message needs to expire
        if self.export_rx.is_some() || self.database_rx.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        } else if self.status_message.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
        }

        // 3. Keyboard shortcuts
        self.handle_keyboard_shortcuts(ctx);

        // ── Top toolbar ─────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .exact_height(38.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                self.render_toolbar(ui);
            });

        // ── Bottom status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(28.0)
            .show(ctx, |ui| {
                self.render_status_bar(ui);
            });

        // ── Left match list ─────────────────────────────────────────
        egui::SidePanel::left("match_list")
            .resizable(true)
            .default_width(230.0)
            .min_width(160.0)
            .max_width(400.0)
            .show(ctx, |ui| {
                self.render_match_list(ui);
            });

        // ── Central description ─────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_description_panel(ui);
        });

        // ── Floating popups ─────────────────────────────────────────
        self.render_about_dialog(ctx);
        self.render_language_dialog(ctx);
    }

    /// Match the GPU clear colour to the themed background.
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        if self.settings.dark_mode {
            crate::ui::theme::BG_DARK.to_normalized_gamma_f32()
        } else {
            crate::ui::theme::BG_LIGHT.to_normalized_gamma_f32()
        }
    }

    /// Persist preferences, including the code currently in the field.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.latest_code = self.code_input.clone();
        self.settings.module_states.extend(self.modules.enabled_map());
        eframe::set_value(storage, crate::core::settings::Settings::STORAGE_KEY, &self.settings);
        tracing::debug!(
            "{} settings saved ({} module states)",
            constants::APP_NAME,
            self.settings.module_states.len()
        );
    }
}
