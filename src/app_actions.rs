//! Extended actions for [`ErrorLookupApp`]: export, database selection,
//! keyboard shortcuts, window level, and the About and language dialogs.
//!
//! These are `impl` blocks on the app struct, split out from `app.rs`
//! to keep file sizes manageable.

use crate::app::{DatabaseSource, ErrorLookupApp};
use crate::core::database::Database;
use crate::util::constants;
use crate::util::time::format_file_stamp;

/// Pin the main window above other windows, or release it.
pub(crate) fn apply_window_level(ctx: &egui::Context, on_top: bool) {
    let level = if on_top {
        egui::WindowLevel::AlwaysOnTop
    } else {
        egui::WindowLevel::Normal
    };
    ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(level));
}

/// Id of the code field in the toolbar.
pub(crate) fn code_field_id() -> egui::Id {
    egui::Id::new("code_input")
}

/// Whether stepping keys may change the code. They do when the code field
/// or nothing has keyboard focus, so caret movement elsewhere is left alone.
pub(crate) fn step_keys_allowed(focused: Option<egui::Id>) -> bool {
    match focused {
        Some(id) => id == code_field_id(),
        None => true,
    }
}

/// Which format an export writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Csv => "CSV",
        }
    }
}

// ── Export actions ──────────────────────────────────────────────────────

impl ErrorLookupApp {
    /// Export the current lookup via a native save dialog.
    ///
    /// Runs on a background thread and sends a completion message back
    /// via `export_rx` so the UI can display feedback.
    pub fn export(&mut self, format: ExportFormat) {
        if self.export_rx.is_some() {
            self.post_status("Export already in progress");
            return;
        }

        let result = match &self.result {
            Some(r) => r.clone(),
            None => {
                self.post_status("Nothing to export");
                return;
            }
        };

        let (tx, rx) = crossbeam_channel::bounded::<String>(1);
        self.export_rx = Some(rx);

        let file_name = format!(
            "ErrorLookup_{:08X}_{}.{}",
            result.code,
            format_file_stamp(&result.looked_up_at),
            format.extension()
        );

        std::thread::spawn(move || {
            let Some(path) = rfd::FileDialog::new()
                .add_filter(format.label(), &[format.extension()])
                .set_file_name(file_name.as_str())
                .save_file()
            else {
                return;
            };

            let outcome = crate::export::csv_export::validate_export_path(&path).and_then(|()| {
                match format {
                    ExportFormat::Json => crate::export::json_export::export_json(&result, &path),
                    ExportFormat::Csv => crate::export::csv_export::export_csv(&result, &path),
                }
            });

            let msg = match outcome {
                Ok(()) => format!("Exported to {}", path.display()),
                Err(e) => {
                    tracing::error!("{} export failed: {}", format.label(), e);
                    format!("{} export failed: {e}", format.label())
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Process export completion messages and expire stale status text.
    pub fn process_export_messages(&mut self) {
        if let Some(rx) = &self.export_rx {
            match rx.try_recv() {
                Ok(msg) => {
                    self.export_rx = None;
                    self.post_status(msg);
                }
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    // Sender dropped without sending (user cancelled the save dialog).
                    self.export_rx = None;
                }
                Err(crossbeam_channel::TryRecvError::Empty) => {}
            }
        }

        if let Some((_, instant)) = &self.status_message {
            if instant.elapsed() > std::time::Duration::from_secs(constants::STATUS_MESSAGE_SECS) {
                self.status_message = None;
            }
        }
    }
}

// ── Database selection ──────────────────────────────────────────────────

impl ErrorLookupApp {
    /// Open a native file dialog (on a background thread) to pick a
    /// database XML. The chosen path is sent back via `database_rx`.
    pub fn open_database_dialog(&mut self) {
        if self.database_rx.is_some() {
            tracing::debug!("open_database_dialog: dialog already open, ignoring");
            return;
        }
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.database_rx = Some(rx);

        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Database XML", &["xml"])
                .set_title("Open Database")
                .pick_file()
            {
                let _ = tx.send(path);
            }
        });
    }

    /// Poll for a database path chosen in the open dialog and load it.
    pub(crate) fn process_database_selection(&mut self) {
        let path = {
            let Some(rx) = &self.database_rx else {
                return;
            };
            match rx.try_recv() {
                Ok(p) => p,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    self.database_rx = None;
                    return;
                }
                Err(crossbeam_channel::TryRecvError::Empty) => return,
            }
        };
        self.database_rx = None;

        match Database::from_file(&path) {
            Ok(db) => {
                let count = db.modules.len();
                self.apply_database(db, DatabaseSource::File(path));
                self.post_status(format!("Loaded database with {count} modules"));
            }
            Err(e) => {
                tracing::error!("Database {} rejected: {}", path.display(), e);
                self.post_status(format!("Database not loaded: {e}"));
            }
        }
    }
}

// ── Keyboard shortcuts ──────────────────────────────────────────────────

impl ErrorLookupApp {
    /// Handle global keyboard shortcuts.
    ///
    /// - **Up/Down**: step the code by one
    /// - **Page Up/Down**: step the code by 0x10
    /// - **Escape**: close open dialogs
    ///
    /// Stepping only applies while the code field (or nothing) has focus.
    pub fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let stepping = step_keys_allowed(ctx.memory(|m| m.focused()));
        let (delta, escape) = ctx.input(|i| {
            let mut delta = 0i32;
            if i.key_pressed(egui::Key::ArrowUp) {
                delta += 1;
            }
            if i.key_pressed(egui::Key::ArrowDown) {
                delta -= 1;
            }
            if i.key_pressed(egui::Key::PageUp) {
                delta += 0x10;
            }
            if i.key_pressed(egui::Key::PageDown) {
                delta -= 0x10;
            }
            (delta, i.key_pressed(egui::Key::Escape))
        });

        if escape {
            if self.show_about {
                self.show_about = false;
            } else if self.show_language {
                self.show_language = false;
            }
        }

        if stepping && delta != 0 && !self.show_language {
            self.step(delta);
        }
    }

    /// Flip the always-on-top preference and apply it.
    pub fn toggle_always_on_top(&mut self, ctx: &egui::Context) {
        self.settings.always_on_top = !self.settings.always_on_top;
        apply_window_level(ctx, self.settings.always_on_top);
    }
}

// ── Dialogs ─────────────────────────────────────────────────────────────

impl ErrorLookupApp {
    /// Render the About dialog window.
    pub fn render_about_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }

        let dark = self.settings.dark_mode;
        let mut open = true;
        egui::Window::new("About")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([320.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new(constants::APP_NAME)
                            .color(crate::ui::theme::accent(dark))
                            .strong()
                            .size(20.0),
                    );
                    ui.label(
                        egui::RichText::new(format!("v{}", constants::APP_VERSION))
                            .color(crate::ui::theme::text_secondary(dark)),
                    );
                    ui.add_space(8.0);
                    ui.label("Describe Windows error codes from system message tables");
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new(format!("Database: {}", self.database_source))
                            .color(crate::ui::theme::text_secondary(dark))
                            .small(),
                    );
                    ui.add_space(8.0);
                });
            });

        if !open {
            self.show_about = false;
        }
    }

    /// Render the message-language dialog.
    pub fn render_language_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_language {
            return;
        }

        let mut should_apply = false;
        let mut should_close = false;
        let valid = crate::core::settings::Settings::parse_lang_id(&self.lang_input).is_some();

        egui::Window::new("Message Language")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([300.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Language ID (hex), 0 for the system default:");
                let response = ui.text_edit_singleline(&mut self.lang_input);
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) && valid
                {
                    should_apply = true;
                }
                if !valid {
                    ui.label(
                        egui::RichText::new("Not a language ID")
                            .color(crate::ui::theme::warning(self.settings.dark_mode))
                            .small(),
                    );
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.add_enabled(valid, egui::Button::new("Apply")).clicked() {
                        should_apply = true;
                    }
                    if ui.button("Cancel").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_apply && self.apply_language() {
            self.show_language = false;
        }
        if should_close {
            self.lang_input = format!("0x{:04X}", self.settings.lang_id);
            self.show_language = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_keys_follow_focus() {
        assert!(step_keys_allowed(None));
        assert!(step_keys_allowed(Some(code_field_id())));
        assert!(!step_keys_allowed(Some(egui::Id::new("description"))));
    }
}
