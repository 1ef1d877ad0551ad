//! Persisted user preferences.
//!
//! [`Settings`] is serialised through eframe storage under
//! [`Settings::STORAGE_KEY`]. Unknown or missing fields fall back to the
//! defaults so older saved state keeps loading.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::util::constants::{DEFAULT_CODE, LANG_NEUTRAL};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Text in the code field when the app last closed.
    pub latest_code: String,
    /// Enabled flag per module path. Absent paths are enabled.
    pub module_states: BTreeMap<String, bool>,
    /// Preferred message language (`LANGID`); 0 is the neutral language.
    pub lang_id: u32,
    pub always_on_top: bool,
    pub dark_mode: bool,
    /// External database file replacing the bundled one.
    pub database_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            latest_code: DEFAULT_CODE.to_string(),
            module_states: BTreeMap::new(),
            lang_id: LANG_NEUTRAL,
            always_on_top: false,
            dark_mode: true,
            database_path: None,
        }
    }
}

impl Settings {
    pub const STORAGE_KEY: &'static str = "settings";

    /// Parse a `LANGID` typed as hex, with or without `0x` (`0x0409`, `409`).
    /// Empty text means the neutral language.
    pub fn parse_lang_id(text: &str) -> Option<u32> {
        let t = text.trim();
        let hex = t
            .strip_prefix("0x")
            .or_else(|| t.strip_prefix("0X"))
            .unwrap_or(t);
        if hex.is_empty() {
            return Some(LANG_NEUTRAL);
        }
        u32::from_str_radix(hex, 16).ok().filter(|v| *v <= 0xFFFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.latest_code, "0x00000000");
        assert_eq!(s.lang_id, 0);
        assert!(s.dark_mode);
        assert!(s.database_path.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings =
            serde_json::from_str(r#"{"latest_code":"5","module_states":{"ntdll.dll":false}}"#)
                .unwrap();
        assert_eq!(s.latest_code, "5");
        assert_eq!(s.module_states.get("ntdll.dll"), Some(&false));
        assert!(s.dark_mode);
    }

    #[test]
    fn test_parse_lang_id() {
        assert_eq!(Settings::parse_lang_id("0x0409"), Some(0x0409));
        assert_eq!(Settings::parse_lang_id("407"), Some(0x0407));
        assert_eq!(Settings::parse_lang_id(""), Some(0));
        assert_eq!(Settings::parse_lang_id("0x10000"), None);
        assert_eq!(Settings::parse_lang_id("en-US"), None);
    }
}
