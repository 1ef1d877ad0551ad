//! CSV export for a lookup result: one row per matching module.

use crate::core::lookup::LookupResult;
use crate::util::constants::NOT_AVAILABLE;
use crate::util::error::LookupError;
use std::path::Path;

/// Export `result` to a CSV file at `path`.
///
/// Columns: Code, Severity, Facility, Module, Path, Message. A lookup with
/// no matches still writes one row carrying the decomposed fields.
///
/// # Errors
/// Returns [`LookupError::Export`] if the file cannot be created or written.
pub fn export_csv(result: &LookupResult, path: &Path) -> Result<(), LookupError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| LookupError::Export(format!("Failed to create CSV file: {e}")))?;

    writer
        .write_record(["Code", "Severity", "Facility", "Module", "Path", "Message"])
        .map_err(|e| LookupError::Export(format!("Failed to write CSV header: {e}")))?;

    let code = format!("0x{:08X}", result.code);
    let severity = result.severity_name.as_deref().unwrap_or(NOT_AVAILABLE);
    let facility = result.facility_name.as_deref().unwrap_or(NOT_AVAILABLE);

    if result.matches.is_empty() {
        writer
            .write_record([code.as_str(), severity, facility, "", "", ""])
            .map_err(|e| LookupError::Export(format!("Failed to write CSV row: {e}")))?;
    }
    for m in &result.matches {
        writer
            .write_record([
                code.as_str(),
                severity,
                facility,
                m.module.as_str(),
                m.path.as_str(),
                m.message.as_str(),
            ])
            .map_err(|e| LookupError::Export(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| LookupError::Export(format!("Failed to flush CSV: {e}")))?;

    tracing::info!(
        "Exported {} match(es) for 0x{:08X} to CSV: {}",
        result.matches.len(),
        result.code,
        path.display()
    );
    Ok(())
}

/// Pre-flight check before opening an export file: the parent directory
/// must exist and be a directory.
///
/// # Errors
/// Returns [`LookupError::Export`] describing the problem.
pub fn validate_export_path(path: &Path) -> Result<(), LookupError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        // Bare file name: relative to the current directory.
        _ => return Ok(()),
    };
    if !parent.exists() {
        return Err(LookupError::Export(format!(
            "Target directory does not exist: {}",
            parent.display()
        )));
    }
    if !parent.is_dir() {
        return Err(LookupError::Export(format!(
            "Target parent is not a directory: {}",
            parent.display()
        )));
    }
    Ok(())
}
