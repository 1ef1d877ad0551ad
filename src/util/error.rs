//! Unified error types for ErrorLookup.
//!
//! All fallible operations throughout the codebase return `Result<T, LookupError>`.
//! Lookup failures that are part of normal operation (a module has no message
//! for a code) are not errors; they simply produce no match.

/// Unified error type used throughout ErrorLookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// A Windows API call failed. `hr` is the raw HRESULT code and `context`
    /// describes which operation triggered the failure.
    #[error("Windows API error: {context} (HRESULT: 0x{hr:08X})")]
    WindowsApi {
        /// The raw HRESULT error code from the Windows API.
        hr: u32,
        /// Human-readable description of the operation that failed.
        context: String,
    },

    /// The text typed by the user is not a decimal or hexadecimal code.
    #[error("Invalid code: {0}")]
    InvalidCode(String),

    /// The module/facility/severity database could not be parsed.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A module index outside the loaded module list.
    #[error("No module at index {0}")]
    ModuleIndex(usize),

    /// The operation needs an OS facility this platform lacks.
    #[error("Not supported on this platform: {0}")]
    Unsupported(String),

    /// Export (CSV or JSON) failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Catch-all for I/O errors (database reads, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Convert a raw Windows `HRESULT` (or `GetLastError` code) into an
/// [`LookupError::WindowsApi`] with the given context string.
///
/// # Example
/// ```ignore
/// windows_err(0x8007007E, "LoadLibraryExW netmsg.dll")
/// ```
pub fn windows_err(hr: u32, context: impl Into<String>) -> LookupError {
    LookupError::WindowsApi {
        hr,
        context: context.into(),
    }
}
