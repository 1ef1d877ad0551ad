//! JSON export for a lookup result.
//!
//! Serialises the result as pretty-printed JSON using Serde.

use crate::core::lookup::LookupResult;
use crate::util::error::LookupError;
use std::path::Path;

/// Export `result` to a JSON file at `path`.
///
/// # Errors
/// Returns [`LookupError::Export`] if the file cannot be created or written.
pub fn export_json(result: &LookupResult, path: &Path) -> Result<(), LookupError> {
    let file = std::fs::File::create(path)
        .map_err(|e| LookupError::Export(format!("Failed to create JSON file: {e}")))?;

    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)
        .map_err(|e| LookupError::Export(format!("Failed to write JSON: {e}")))?;

    // Explicit flush so I/O errors are not silently swallowed by BufWriter::drop.
    use std::io::Write;
    writer
        .flush()
        .map_err(|e| LookupError::Export(format!("Failed to flush JSON output: {e}")))?;

    tracing::info!(
        "Exported lookup of 0x{:08X} to JSON: {}",
        result.code,
        path.display()
    );
    Ok(())
}
