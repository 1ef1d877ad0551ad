//! A single lookup pass: decompose the code, name its fields, and collect
//! every module message for it.

use chrono::{DateTime, Utc};

use super::database::Database;
use super::hresult::CodeFields;
use super::module_set::ModuleSet;
use crate::util::constants::NOT_AVAILABLE;

/// A module that had a message for the code.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ModuleMatch {
    /// Index into the module set.
    #[serde(skip)]
    pub index: usize,
    pub module: String,
    pub path: String,
    pub message: String,
}

/// Everything known about one code.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LookupResult {
    pub code: u32,
    pub fields: CodeFields,
    pub severity_name: Option<String>,
    pub facility_name: Option<String>,
    pub matches: Vec<ModuleMatch>,
    pub looked_up_at: DateTime<Utc>,
}

/// Look `code` up against the database tables and every loaded module.
pub fn run_lookup(code: u32, db: &Database, modules: &mut ModuleSet, lang_id: u32) -> LookupResult {
    let fields = CodeFields::decompose(code);

    let matches = modules
        .describe(code, lang_id)
        .into_iter()
        .filter_map(|index| {
            let entry = modules.get(index)?;
            Some(ModuleMatch {
                index,
                module: entry.descriptor.text.clone(),
                path: entry.descriptor.path.clone(),
                message: entry.message.clone()?,
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!("0x{:08X}: {} module(s) matched", code, matches.len());

    LookupResult {
        code,
        fields,
        severity_name: db.severity_name(fields.severity).map(String::from),
        facility_name: db.facility_name(fields.facility).map(String::from),
        matches,
        looked_up_at: Utc::now(),
    }
}

impl LookupResult {
    /// The information block shown above the selected message.
    pub fn summary(&self) -> String {
        format!(
            "Code (dec): {code}\n\
             Code (hex): 0x{code:08X}\n\
             Severity: {sev} ({sev_v})\n\
             Facility: {fac} ({fac_v})\n\
             Status code: {st} (0x{st:04X})",
            code = self.code,
            sev = self.severity_name.as_deref().unwrap_or(NOT_AVAILABLE),
            sev_v = self.fields.severity,
            fac = self.facility_name.as_deref().unwrap_or(NOT_AVAILABLE),
            fac_v = self.fields.facility,
            st = self.fields.status,
        )
    }

    /// Summary followed by the message of match `selected`, if any.
    pub fn description(&self, selected: Option<usize>) -> String {
        match selected.and_then(|i| self.matches.get(i)) {
            Some(m) => format!("{}\n\n{}", self.summary(), m.message),
            None => self.summary(),
        }
    }

    /// Hover text for match `i`: `"Module [path]"` then the message.
    pub fn tooltip(&self, i: usize) -> Option<String> {
        self.matches
            .get(i)
            .map(|m| format!("{} [{}]\n{}", m.module, m.path, m.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::module_set::tests::{descriptor, loader};
    use std::collections::BTreeMap;

    fn db() -> Database {
        Database::parse(
            r#"<root>
                 <facility><item code="7" text="FACILITY_WIN32"/></facility>
                 <severity><item code="0" text="Success"/><item code="2" text="Warning"/></severity>
               </root>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_collects_matches_and_names() {
        let l = loader();
        let mut set = ModuleSet::load(
            &[descriptor("a.dll"), descriptor("b.dll")],
            &BTreeMap::new(),
            &l,
        );
        let r = run_lookup(5, &db(), &mut set, 0);
        assert_eq!(r.matches.len(), 2);
        assert_eq!(r.matches[0].module, "A.DLL");
        assert_eq!(r.matches[1].index, 1);
        assert_eq!(r.severity_name.as_deref(), Some("Success"));
        // Facility 0 is absent from this table.
        assert_eq!(r.facility_name, None);
        assert!(r.summary().contains("Facility: n/a (0)"));
    }

    #[test]
    fn test_summary_layout() {
        let mut set = ModuleSet::default();
        let r = run_lookup(0x8007_0005, &db(), &mut set, 0);
        assert_eq!(
            r.summary(),
            "Code (dec): 2147942405\n\
             Code (hex): 0x80070005\n\
             Severity: Warning (2)\n\
             Facility: FACILITY_WIN32 (7)\n\
             Status code: 5 (0x0005)"
        );
    }

    #[test]
    fn test_description_and_tooltip() {
        let l = loader();
        let mut set = ModuleSet::load(&[descriptor("b.dll")], &BTreeMap::new(), &l);
        let r = run_lookup(5, &db(), &mut set, 0);
        assert!(r.description(Some(0)).ends_with("\n\nB says denied."));
        assert_eq!(r.description(None), r.summary());
        assert_eq!(r.description(Some(4)), r.summary());
        assert_eq!(
            r.tooltip(0).as_deref(),
            Some("B.DLL [b.dll]\nB says denied.")
        );
        assert_eq!(r.tooltip(1), None);
    }
}
