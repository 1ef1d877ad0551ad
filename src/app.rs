//! Top-level application state and its core operations.
//!
//! `ErrorLookupApp` owns the database, the module registry, the current
//! lookup result, and persisted settings. Rendering is delegated to the
//! panel sub-modules in `ui/`; the frame loop lives in `app_update.rs`.

use std::path::PathBuf;

use crossbeam_channel::Receiver;

use crate::core::code_input::{parse_code, step_code};
use crate::core::database::Database;
use crate::core::lookup::{run_lookup, LookupResult};
use crate::core::message_table::SystemLoader;
use crate::core::module_set::ModuleSet;
use crate::core::settings::Settings;

/// Where the active database came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    Bundled,
    File(PathBuf),
}

impl std::fmt::Display for DatabaseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseSource::Bundled => write!(f, "bundled database"),
            DatabaseSource::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Work done before the window opens so the creator closure stays trivial.
pub struct PreInitState {
    bundled: Database,
    startup_error: Option<String>,
}

impl PreInitState {
    /// Parse the bundled database.
    pub fn build() -> Self {
        match Database::bundled() {
            Ok(db) => Self {
                bundled: db,
                startup_error: None,
            },
            Err(e) => {
                tracing::error!("Bundled database is unusable: {}", e);
                Self {
                    bundled: Database::default(),
                    startup_error: Some(format!("Bundled database failed to load: {e}")),
                }
            }
        }
    }
}

/// Central application state for ErrorLookup.
pub struct ErrorLookupApp {
    // ── Persisted preferences ───────────────────────────────────
    pub settings: Settings,

    // ── Data ────────────────────────────────────────────────────
    pub database: Database,
    pub database_source: DatabaseSource,
    pub modules: ModuleSet,
    pub loader: SystemLoader,

    // ── Lookup ──────────────────────────────────────────────────
    /// Raw text of the code field.
    pub code_input: String,
    /// Parse error for `code_input`, shown in the status bar.
    pub input_error: Option<String>,
    pub result: Option<LookupResult>,
    /// Index into `result.matches` of the selected row.
    pub selected_match: Option<usize>,

    // ── Dialogs ─────────────────────────────────────────────────
    pub show_about: bool,
    pub show_language: bool,
    /// Text field backing the language dialog.
    pub lang_input: String,

    // ── Background dialogs and feedback ─────────────────────────
    /// Completion messages from export threads.
    pub export_rx: Option<Receiver<String>>,
    /// Database file chosen in the open dialog.
    pub database_rx: Option<Receiver<PathBuf>>,
    /// Transient status message and when it was posted.
    pub status_message: Option<(String, std::time::Instant)>,
}

impl ErrorLookupApp {
    /// Restore settings, load the modules, and run the first lookup.
    pub fn from_pre_init(cc: &eframe::CreationContext<'_>, pre: PreInitState) -> Self {
        let settings = cc
            .storage
            .and_then(|s| eframe::get_value::<Settings>(s, Settings::STORAGE_KEY))
            .unwrap_or_default();

        if settings.dark_mode {
            crate::ui::theme::apply_dark_theme(&cc.egui_ctx);
        } else {
            crate::ui::theme::apply_light_theme(&cc.egui_ctx);
        }
        if settings.always_on_top {
            crate::app_actions::apply_window_level(&cc.egui_ctx, true);
        }

        let mut app = Self::new(settings, pre.bundled);
        if let Some(msg) = pre.startup_error {
            app.post_status(msg);
        }

        if let Some(path) = app.settings.database_path.clone() {
            match Database::from_file(&path) {
                Ok(db) => app.apply_database(db, DatabaseSource::File(path)),
                Err(e) => {
                    tracing::warn!("Saved database {} failed to load: {}", path.display(), e);
                    app.settings.database_path = None;
                    app.post_status(format!("Database {} failed to load: {e}", path.display()));
                }
            }
        }

        app
    }

    /// Build the app around `settings` and `database` without any UI context.
    pub fn new(settings: Settings, database: Database) -> Self {
        let loader = SystemLoader;
        let modules = ModuleSet::load(&database.modules, &settings.module_states, &loader);
        let code_input = settings.latest_code.clone();
        let lang_input = format!("0x{:04X}", settings.lang_id);

        let mut app = Self {
            settings,
            database,
            database_source: DatabaseSource::Bundled,
            modules,
            loader,
            code_input,
            input_error: None,
            result: None,
            selected_match: None,
            show_about: false,
            show_language: false,
            lang_input,
            export_rx: None,
            database_rx: None,
            status_message: None,
        };
        app.refresh_lookup();
        app
    }
}

// ── Core logic ──────────────────────────────────────────────────────────

impl ErrorLookupApp {
    /// Re-run the lookup for the current contents of the code field.
    ///
    /// The first match, if any, becomes the selection.
    pub fn refresh_lookup(&mut self) {
        match parse_code(&self.code_input) {
            Ok(parsed) => {
                self.input_error = None;
                let result = run_lookup(
                    parsed.value,
                    &self.database,
                    &mut self.modules,
                    self.settings.lang_id,
                );
                self.selected_match = if result.matches.is_empty() {
                    None
                } else {
                    Some(0)
                };
                self.result = Some(result);
            }
            Err(e) => {
                tracing::debug!("{}", e);
                self.input_error = Some(e.to_string());
                self.result = None;
                self.selected_match = None;
            }
        }
    }

    /// Step the code by `delta`, keeping its radix.
    pub fn step(&mut self, delta: i32) {
        self.code_input = step_code(&self.code_input, delta);
        self.refresh_lookup();
    }

    /// Toggle module `index` from the Modules menu and look the code up
    /// again. An unavailable module is retried, not switched off.
    pub fn toggle_module(&mut self, index: usize) {
        let Some(path) = self.modules.get(index).map(|e| e.descriptor.path.clone()) else {
            return;
        };

        match self.modules.toggle(index, &self.loader) {
            Ok(enabled) => {
                self.settings.module_states.insert(path, enabled);
            }
            Err(e) => {
                tracing::error!("Toggling module {} failed: {}", index, e);
                return;
            }
        }
        self.refresh_lookup();
    }

    /// Replace the database and reload every module it lists.
    pub fn apply_database(&mut self, database: Database, source: DatabaseSource) {
        self.modules =
            ModuleSet::load(&database.modules, &self.settings.module_states, &self.loader);
        self.database = database;
        self.settings.database_path = match &source {
            DatabaseSource::Bundled => None,
            DatabaseSource::File(p) => Some(p.clone()),
        };
        tracing::info!("Using {}", source);
        self.database_source = source;
        self.refresh_lookup();
    }

    /// Switch back to the database compiled into the binary.
    pub fn use_bundled_database(&mut self) {
        match Database::bundled() {
            Ok(db) => self.apply_database(db, DatabaseSource::Bundled),
            Err(e) => self.post_status(format!("Bundled database failed to load: {e}")),
        }
    }

    /// Apply the language typed into the language dialog.
    ///
    /// Returns `false` if the text is not a valid `LANGID`.
    pub fn apply_language(&mut self) -> bool {
        match Settings::parse_lang_id(&self.lang_input) {
            Some(lang) => {
                self.settings.lang_id = lang;
                self.lang_input = format!("0x{lang:04X}");
                tracing::info!("Message language set to 0x{:04X}", lang);
                self.refresh_lookup();
                true
            }
            None => false,
        }
    }

    /// The selected match's `"Module [path]"`, for the status bar.
    pub fn selected_module_label(&self) -> Option<String> {
        let result = self.result.as_ref()?;
        let m = result.matches.get(self.selected_match?)?;
        Some(format!("{} [{}]", m.module, m.path))
    }

    /// Text for the description pane.
    pub fn description_text(&self) -> String {
        match &self.result {
            Some(r) => r.description(self.selected_match),
            None => String::new(),
        }
    }

    pub fn post_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), std::time::Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::module_set::ModuleState;

    fn app_with(code: &str) -> ErrorLookupApp {
        let settings = Settings {
            latest_code: code.to_string(),
            ..Settings::default()
        };
        ErrorLookupApp::new(settings, Database::bundled().unwrap())
    }

    #[test]
    fn test_initial_lookup_runs() {
        let app = app_with("0x80070005");
        let r = app.result.as_ref().unwrap();
        assert_eq!(r.code, 0x8007_0005);
        assert_eq!(r.facility_name.as_deref(), Some("FACILITY_WIN32"));
        assert!(app.description_text().starts_with("Code (dec): 2147942405"));
    }

    #[test]
    fn test_invalid_input_clears_result() {
        let mut app = app_with("0");
        app.code_input = "zzz".into();
        app.refresh_lookup();
        assert!(app.result.is_none());
        assert!(app.input_error.as_deref().unwrap().contains("zzz"));
        assert_eq!(app.description_text(), "");
    }

    #[test]
    fn test_step_keeps_radix() {
        let mut app = app_with("0x0000000F");
        app.step(1);
        assert_eq!(app.code_input, "0x00000010");
        assert_eq!(app.result.as_ref().unwrap().code, 0x10);
    }

    #[test]
    fn test_toggle_module_persists_choice() {
        let mut app = app_with("5");
        let path = app.modules.entries()[0].descriptor.path.clone();
        let loaded = app.modules.entries()[0].state == ModuleState::Loaded;

        app.toggle_module(0);
        if loaded {
            assert_eq!(app.settings.module_states.get(&path), Some(&false));
            assert_eq!(app.modules.entries()[0].state, ModuleState::Disabled);
        } else {
            // A module that failed to load is retried and stays enabled.
            assert_eq!(app.settings.module_states.get(&path), Some(&true));
            assert!(matches!(
                app.modules.entries()[0].state,
                ModuleState::Unavailable(_)
            ));
        }
        assert!(app.result.is_some());
        // Out of range is ignored.
        app.toggle_module(10_000);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_unavailable_module_is_never_disabled_by_clicks() {
        let mut app = app_with("5");
        for _ in 0..3 {
            app.toggle_module(0);
        }
        assert!(app.modules.entries()[0].is_enabled());
        assert!(app.settings.module_states.values().all(|v| *v));
    }

    #[test]
    fn test_apply_language() {
        let mut app = app_with("5");
        app.lang_input = "409".into();
        assert!(app.apply_language());
        assert_eq!(app.settings.lang_id, 0x0409);
        assert_eq!(app.lang_input, "0x0409");
        app.lang_input = "english".into();
        assert!(!app.apply_language());
        assert_eq!(app.settings.lang_id, 0x0409);
    }
}
