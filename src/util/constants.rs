//! Application-wide constants for ErrorLookup.
//!
//! Centralising magic numbers and configuration defaults here keeps the rest
//! of the codebase clean and makes tuning straightforward.

/// Application display name used in titles, dialogs, etc.
pub const APP_NAME: &str = "ErrorLookup";

/// Application version string.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Code shown in the input field on first launch.
pub const DEFAULT_CODE: &str = "0x00000000";

/// Neutral language ID passed to `FormatMessageW` as the fallback when the
/// preferred language has no entry in a module's message table.
pub const LANG_NEUTRAL: u32 = 0;

/// Mask applied to bits 16.. of a code to extract the facility
/// (same width as the SDK's `HRESULT_FACILITY`).
pub const FACILITY_MASK: u32 = 0x1FFF;

/// Upper bound on the number of modules accepted from a database file.
/// The bundled list is a few dozen entries; anything far beyond that is
/// almost certainly a malformed or hostile file.
pub const MAX_MODULES: usize = 512;

/// Text displayed for a severity or facility value with no table entry.
pub const NOT_AVAILABLE: &str = "n/a";

/// How long transient status messages (exports, database loads) stay visible.
pub const STATUS_MESSAGE_SECS: u64 = 4;

/// Row height in the match list (in logical pixels).
pub const MATCH_ROW_HEIGHT: f32 = 24.0;

/// Application data subdirectory name for logs.
pub const APP_DATA_DIR: &str = "ErrorLookup";

/// Log subdirectory name under the app data directory.
pub const LOG_DIR: &str = "logs";

/// Log file name for persistent error/debug logging.
pub const LOG_FILE_NAME: &str = "errorlookup.log";

/// Maximum log file size in bytes before rotation (5 MB).
pub const MAX_LOG_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Name the log file is renamed to when it exceeds [`MAX_LOG_FILE_SIZE`].
pub const LOG_FILE_BACKUP_NAME: &str = "errorlookup.log.old";
