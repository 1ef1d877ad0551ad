//! Registry of database modules and their enabled/loaded state.
//!
//! Entries keep database order. A module is enabled unless the persisted
//! preferences say otherwise; enabled modules are loaded immediately and
//! stay mapped until disabled.

use std::collections::BTreeMap;

use super::database::ModuleDescriptor;
use super::message_table::{format_message, MessageTable, ModuleLoader};
use crate::util::error::LookupError;

/// Whether a module takes part in lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleState {
    /// Switched off by the user.
    Disabled,
    /// Enabled, but the loader failed. Carries the error text.
    Unavailable(String),
    /// Enabled and mapped.
    Loaded,
}

/// One module and, when loaded, its message table.
pub struct ModuleEntry {
    pub descriptor: ModuleDescriptor,
    pub state: ModuleState,
    /// Message produced for the most recent lookup, if any.
    pub message: Option<String>,
    table: Option<Box<dyn MessageTable>>,
}

impl ModuleEntry {
    pub fn is_enabled(&self) -> bool {
        self.state != ModuleState::Disabled
    }

    fn load(&mut self, loader: &dyn ModuleLoader) {
        match loader.load(&self.descriptor.path) {
            Ok(table) => {
                self.table = Some(table);
                self.state = ModuleState::Loaded;
            }
            Err(e) => {
                tracing::warn!("Module {} unavailable: {}", self.descriptor.path, e);
                self.table = None;
                self.state = ModuleState::Unavailable(e.to_string());
            }
        }
    }

    fn unload(&mut self) {
        self.table = None;
        self.message = None;
        self.state = ModuleState::Disabled;
    }
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("descriptor", &self.descriptor)
            .field("state", &self.state)
            .field("message", &self.message)
            .finish()
    }
}

/// All modules from the database, in database order.
#[derive(Debug, Default)]
pub struct ModuleSet {
    entries: Vec<ModuleEntry>,
}

impl ModuleSet {
    /// Build the set and load every enabled module.
    ///
    /// `enabled` maps module paths to the user's persisted choice; paths
    /// absent from the map are enabled.
    pub fn load(
        descriptors: &[ModuleDescriptor],
        enabled: &BTreeMap<String, bool>,
        loader: &dyn ModuleLoader,
    ) -> Self {
        let entries = descriptors
            .iter()
            .map(|d| {
                let mut entry = ModuleEntry {
                    descriptor: d.clone(),
                    state: ModuleState::Disabled,
                    message: None,
                    table: None,
                };
                if enabled.get(&d.path).copied().unwrap_or(true) {
                    entry.load(loader);
                }
                entry
            })
            .collect();

        let set = Self { entries };
        tracing::info!("{} of {} modules loaded", set.loaded_count(), set.len());
        set
    }

    /// Enable or disable the module at `index`.
    ///
    /// Enabling an already enabled module retries the load when it is
    /// unavailable. Disabling releases the module and its cached message.
    ///
    /// # Errors
    /// Returns [`LookupError::ModuleIndex`] if `index` is out of range.
    pub fn set_enabled(
        &mut self,
        index: usize,
        enabled: bool,
        loader: &dyn ModuleLoader,
    ) -> Result<(), LookupError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(LookupError::ModuleIndex(index))?;

        if !enabled {
            entry.unload();
        } else if entry.state != ModuleState::Loaded {
            entry.load(loader);
        }
        tracing::info!(
            "Module {} {}",
            entry.descriptor.path,
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(())
    }

    /// Menu click on module `index`. Returns the enabled flag to persist.
    ///
    /// A loaded module is disabled and a disabled one enabled. An
    /// unavailable module stays enabled and its load is retried.
    ///
    /// # Errors
    /// Returns [`LookupError::ModuleIndex`] if `index` is out of range.
    pub fn toggle(&mut self, index: usize, loader: &dyn ModuleLoader) -> Result<bool, LookupError> {
        let enable = match &self
            .entries
            .get(index)
            .ok_or(LookupError::ModuleIndex(index))?
            .state
        {
            ModuleState::Loaded => false,
            ModuleState::Disabled | ModuleState::Unavailable(_) => true,
        };
        self.set_enabled(index, enable, loader)?;
        Ok(enable)
    }

    /// Query every loaded module for `code`.
    ///
    /// Each module's cached message is replaced by this lookup's result.
    /// Returns the indices of modules that produced text, in order.
    pub fn describe(&mut self, code: u32, lang_id: u32) -> Vec<usize> {
        let mut hits = Vec::new();
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.message = match &entry.table {
                Some(table) => format_message(table.as_ref(), code, lang_id),
                None => None,
            };
            if entry.message.is_some() {
                hits.push(i);
            }
        }
        hits
    }

    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ModuleEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn loaded_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.state == ModuleState::Loaded)
            .count()
    }

    /// Enabled flag per module path, for persisting.
    pub fn enabled_map(&self) -> BTreeMap<String, bool> {
        self.entries
            .iter()
            .map(|e| (e.descriptor.path.clone(), e.is_enabled()))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Loader serving fixed per-module message maps; paths missing from the
    /// map fail to load, as does the first attempt on a path in `fail_once`.
    /// Records every load attempt.
    pub(crate) struct FakeLoader {
        pub tables: HashMap<&'static str, HashMap<u32, &'static str>>,
        pub fail_once: RefCell<Vec<&'static str>>,
        pub attempts: RefCell<Vec<String>>,
    }

    struct FakeTable(HashMap<u32, &'static str>);

    impl MessageTable for FakeTable {
        fn raw_message(&self, code: u32, _lang_id: u32) -> Option<String> {
            self.0.get(&code).map(|s| s.to_string())
        }
    }

    impl ModuleLoader for FakeLoader {
        fn load(&self, path: &str) -> Result<Box<dyn MessageTable>, LookupError> {
            self.attempts.borrow_mut().push(path.to_string());
            let mut fail_once = self.fail_once.borrow_mut();
            if let Some(pos) = fail_once.iter().position(|p| *p == path) {
                fail_once.remove(pos);
                return Err(LookupError::Unsupported(format!("{path} busy")));
            }
            self.tables
                .get(path)
                .map(|t| Box::new(FakeTable(t.clone())) as Box<dyn MessageTable>)
                .ok_or_else(|| LookupError::Unsupported(format!("no {path}")))
        }
    }

    pub(crate) fn descriptor(path: &str) -> ModuleDescriptor {
        ModuleDescriptor {
            path: path.to_string(),
            text: path.to_uppercase(),
        }
    }

    pub(crate) fn loader() -> FakeLoader {
        FakeLoader {
            tables: HashMap::from([
                ("a.dll", HashMap::from([(5, "Access is denied.\r\n"), (6, "%1")])),
                ("b.dll", HashMap::from([(5, "B says denied.\r\n")])),
            ]),
            fail_once: RefCell::new(Vec::new()),
            attempts: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_load_respects_persisted_choice() {
        let l = loader();
        let enabled = BTreeMap::from([("b.dll".to_string(), false)]);
        let set = ModuleSet::load(
            &[descriptor("a.dll"), descriptor("b.dll"), descriptor("missing.dll")],
            &enabled,
            &l,
        );
        assert_eq!(set.len(), 3);
        assert_eq!(set.loaded_count(), 1);
        assert_eq!(set.entries()[1].state, ModuleState::Disabled);
        assert!(matches!(set.entries()[2].state, ModuleState::Unavailable(_)));
        // Disabled modules are never opened.
        assert_eq!(*l.attempts.borrow(), vec!["a.dll", "missing.dll"]);
    }

    #[test]
    fn test_describe_returns_hits_in_order() {
        let l = loader();
        let mut set = ModuleSet::load(
            &[descriptor("a.dll"), descriptor("b.dll")],
            &BTreeMap::new(),
            &l,
        );
        assert_eq!(set.describe(5, 0), vec![0, 1]);
        assert_eq!(set.entries()[0].message.as_deref(), Some("Access is denied."));

        // Insert-only template and unknown codes produce nothing and clear
        // the previous lookup's cached text.
        assert!(set.describe(6, 0).is_empty());
        assert_eq!(set.entries()[0].message, None);
        assert!(set.describe(99, 0).is_empty());
    }

    #[test]
    fn test_toggle_unloads_and_reloads() {
        let l = loader();
        let mut set = ModuleSet::load(&[descriptor("a.dll")], &BTreeMap::new(), &l);
        set.describe(5, 0);

        set.set_enabled(0, false, &l).unwrap();
        assert_eq!(set.loaded_count(), 0);
        assert_eq!(set.entries()[0].message, None);
        assert!(set.describe(5, 0).is_empty());
        assert_eq!(set.enabled_map().get("a.dll"), Some(&false));

        set.set_enabled(0, true, &l).unwrap();
        assert_eq!(set.loaded_count(), 1);
        assert_eq!(set.describe(5, 0), vec![0]);
        // Re-enabling an already loaded module does not reopen it.
        set.set_enabled(0, true, &l).unwrap();
        assert_eq!(l.attempts.borrow().len(), 2);
    }

    #[test]
    fn test_toggle_retries_unavailable_module() {
        let l = loader();
        l.fail_once.borrow_mut().push("a.dll");
        let mut set = ModuleSet::load(&[descriptor("a.dll")], &BTreeMap::new(), &l);
        assert!(matches!(set.entries()[0].state, ModuleState::Unavailable(_)));

        // The click retries the load rather than switching the module off.
        assert!(set.toggle(0, &l).unwrap());
        assert_eq!(set.entries()[0].state, ModuleState::Loaded);
        assert_eq!(set.describe(5, 0), vec![0]);
        assert_eq!(*l.attempts.borrow(), vec!["a.dll", "a.dll"]);

        // Loaded now, so the next click disables it.
        assert!(!set.toggle(0, &l).unwrap());
        assert_eq!(set.entries()[0].state, ModuleState::Disabled);
        assert!(set.toggle(0, &l).unwrap());
        assert_eq!(set.loaded_count(), 1);
    }

    #[test]
    fn test_toggle_still_unavailable_stays_enabled() {
        let l = loader();
        let mut set = ModuleSet::load(&[descriptor("missing.dll")], &BTreeMap::new(), &l);
        assert!(set.toggle(0, &l).unwrap());
        assert!(matches!(set.entries()[0].state, ModuleState::Unavailable(_)));
        assert_eq!(set.enabled_map().get("missing.dll"), Some(&true));
        assert!(matches!(set.toggle(9, &l), Err(LookupError::ModuleIndex(9))));
    }

    #[test]
    fn test_bad_index() {
        let l = loader();
        let mut set = ModuleSet::load(&[], &BTreeMap::new(), &l);
        assert!(set.is_empty());
        assert!(matches!(
            set.set_enabled(3, true, &l),
            Err(LookupError::ModuleIndex(3))
        ));
    }
}
