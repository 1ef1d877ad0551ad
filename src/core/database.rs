//! Module, facility and severity tables loaded from XML.
//!
//! The bundled database is compiled into the binary with `include_str!`.
//! A user-supplied file with the same schema can replace it at runtime.
//!
//! ```xml
//! <root>
//!   <module>
//!     <item file="kernel32.dll" text="Kernel32" />
//!   </module>
//!   <facility>
//!     <item code="7" text="FACILITY_WIN32" />
//!   </facility>
//!   <severity>
//!     <item code="0" text="Success" />
//!   </severity>
//! </root>
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::util::constants::MAX_MODULES;
use crate::util::error::LookupError;

static BUNDLED_XML: &str = include_str!("../../assets/database.xml");

/// One message-table module listed in the database.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ModuleDescriptor {
    /// File name or path passed to the loader, e.g. `netmsg.dll`.
    pub path: String,
    /// Display name. Defaults to `path` when the XML gives none.
    pub text: String,
}

/// Parsed contents of a database XML document.
#[derive(Debug, Clone, Default)]
pub struct Database {
    pub modules: Vec<ModuleDescriptor>,
    pub facilities: BTreeMap<u32, String>,
    pub severities: BTreeMap<u32, String>,
}

impl Database {
    /// Parse the database compiled into the binary.
    pub fn bundled() -> Result<Self, LookupError> {
        Self::parse(BUNDLED_XML)
    }

    /// Read and parse a database file from disk.
    pub fn from_file(path: &Path) -> Result<Self, LookupError> {
        let xml = std::fs::read_to_string(path)?;
        let db = Self::parse(&xml)?;
        tracing::info!(
            "Loaded database {} ({} modules, {} facilities, {} severities)",
            path.display(),
            db.modules.len(),
            db.facilities.len(),
            db.severities.len()
        );
        Ok(db)
    }

    /// Parse a database XML string.
    ///
    /// # Errors
    /// Returns [`LookupError::XmlParse`] if the XML is malformed or the
    /// document element is not `<root>`. Missing sections are empty, and
    /// individual bad items are skipped with a warning.
    pub fn parse(xml: &str) -> Result<Self, LookupError> {
        let doc = roxmltree::Document::parse(xml)
            .map_err(|e| LookupError::XmlParse(format!("Failed to parse XML: {e}")))?;

        let root = doc.root_element();
        if root.tag_name().name() != "root" {
            return Err(LookupError::XmlParse(format!(
                "Expected <root> element, found <{}>",
                root.tag_name().name()
            )));
        }

        let mut db = Database::default();

        if let Some(section) = find_child(&root, "module") {
            for item in items(section) {
                let Some(path) = item.attribute("file").map(str::trim).filter(|p| !p.is_empty())
                else {
                    tracing::warn!("Skipping module item without a file attribute");
                    continue;
                };
                if db.modules.iter().any(|m| m.path.eq_ignore_ascii_case(path)) {
                    tracing::debug!("Skipping duplicate module {}", path);
                    continue;
                }
                if db.modules.len() >= MAX_MODULES {
                    tracing::warn!("Module list truncated at {} entries", MAX_MODULES);
                    break;
                }
                let text = item
                    .attribute("text")
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .unwrap_or(path);
                db.modules.push(ModuleDescriptor {
                    path: path.to_string(),
                    text: text.to_string(),
                });
            }
        }

        if let Some(section) = find_child(&root, "facility") {
            read_code_table(section, &mut db.facilities);
        }
        if let Some(section) = find_child(&root, "severity") {
            read_code_table(section, &mut db.severities);
        }

        Ok(db)
    }

    pub fn severity_name(&self, severity: u32) -> Option<&str> {
        self.severities.get(&severity).map(String::as_str)
    }

    pub fn facility_name(&self, facility: u32) -> Option<&str> {
        self.facilities.get(&facility).map(String::as_str)
    }
}

/// Find a direct child element by local name.
fn find_child<'a>(
    parent: &'a roxmltree::Node<'a, 'a>,
    local_name: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    parent
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == local_name)
}

/// `<item>` children of a section, in document order.
fn items<'a, 'input: 'a>(
    section: roxmltree::Node<'a, 'input>,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> {
    section
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "item")
}

/// Fill `table` from `<item code=".." text=".."/>` children.
fn read_code_table(section: roxmltree::Node, table: &mut BTreeMap<u32, String>) {
    for item in items(section) {
        let code = match item.attribute("code").and_then(parse_code_attr) {
            Some(c) => c,
            None => {
                tracing::warn!(
                    "Skipping {} item with bad code {:?}",
                    section.tag_name().name(),
                    item.attribute("code")
                );
                continue;
            }
        };
        let text = item.attribute("text").unwrap_or("").trim().to_string();
        table.insert(code, text);
    }
}

/// Decimal or `0x`-prefixed hex.
fn parse_code_attr(s: &str) -> Option<u32> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <module>
    <item file="kernel32.dll" text="Kernel32" />
    <item file="netmsg.dll" />
    <item text="no file" />
    <item file="KERNEL32.DLL" text="duplicate" />
  </module>
  <facility>
    <item code="7" text="FACILITY_WIN32" />
    <item code="0x87A" text="FACILITY_DXGI" />
    <item code="seven" text="bad" />
  </facility>
  <severity>
    <item code="0" text="Success" />
    <item code="3" text="Error" />
  </severity>
</root>"#;

    #[test]
    fn test_parse_sample() {
        let db = Database::parse(SAMPLE).unwrap();
        assert_eq!(db.modules.len(), 2);
        assert_eq!(db.modules[0].text, "Kernel32");
        // Missing text falls back to the file name.
        assert_eq!(db.modules[1].text, "netmsg.dll");
        assert_eq!(db.facility_name(7), Some("FACILITY_WIN32"));
        assert_eq!(db.facility_name(0x87A), Some("FACILITY_DXGI"));
        assert_eq!(db.facilities.len(), 2);
        assert_eq!(db.severity_name(3), Some("Error"));
        assert_eq!(db.severity_name(1), None);
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let db = Database::parse("<root/>").unwrap();
        assert!(db.modules.is_empty());
        assert!(db.facilities.is_empty());
        assert!(db.severities.is_empty());
    }

    #[test]
    fn test_wrong_root_and_malformed_xml() {
        assert!(matches!(
            Database::parse("<database/>"),
            Err(LookupError::XmlParse(_))
        ));
        assert!(matches!(
            Database::parse("<root><module>"),
            Err(LookupError::XmlParse(_))
        ));
    }

    #[test]
    fn test_bundled_database_is_complete() {
        let db = Database::bundled().unwrap();
        assert!(!db.modules.is_empty());
        for sev in 0..4 {
            assert!(db.severity_name(sev).is_some(), "severity {sev} missing");
        }
        assert_eq!(db.facility_name(7), Some("FACILITY_WIN32"));
    }
}
