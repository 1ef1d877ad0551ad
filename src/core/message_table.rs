//! Message-table lookup in loaded modules.
//!
//! A module is mapped as a data file with `LoadLibraryExW` and queried
//! with `FormatMessageW(FORMAT_MESSAGE_FROM_HMODULE)`. The loader sits behind
//! the [`ModuleLoader`] trait so the registry and lookup logic can be
//! exercised without the OS.

use crate::util::constants::LANG_NEUTRAL;
use crate::util::error::LookupError;

/// A loaded module whose message table can be queried.
pub trait MessageTable {
    /// The message text for `code` in `lang_id`, exactly as the OS returns
    /// it, or `None` if the module has no entry in that language.
    fn raw_message(&self, code: u32, lang_id: u32) -> Option<String>;
}

/// Opens modules by path.
pub trait ModuleLoader {
    fn load(&self, path: &str) -> Result<Box<dyn MessageTable>, LookupError>;
}

/// Look up `code` in `table`, falling back to the neutral language.
///
/// The neutral retry only happens when the preferred language has no entry
/// at all. A message that exists but is an insert-only template (`%1`)
/// counts as no description and is not retried.
pub fn format_message(table: &dyn MessageTable, code: u32, lang_id: u32) -> Option<String> {
    let raw = match table.raw_message(code, lang_id) {
        Some(raw) => raw,
        None if lang_id != LANG_NEUTRAL => table.raw_message(code, LANG_NEUTRAL)?,
        None => return None,
    };
    clean_message(&raw)
}

/// Normalise a raw message: drop insert-only templates and trim the
/// trailing CR/LF the message compiler appends.
pub fn clean_message(raw: &str) -> Option<String> {
    if raw.starts_with("%1") {
        return None;
    }
    let trimmed = raw.trim_matches(|c| c == '\r' || c == '\n' || c == ' ');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The OS module loader.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLoader;

#[cfg(windows)]
mod os {
    use windows::core::{PCWSTR, PWSTR};
    use windows::Win32::Foundation::{FreeLibrary, LocalFree, HANDLE, HLOCAL, HMODULE};
    use windows::Win32::System::Diagnostics::Debug::{
        FormatMessageW, FORMAT_MESSAGE_ALLOCATE_BUFFER, FORMAT_MESSAGE_FROM_HMODULE,
        FORMAT_MESSAGE_IGNORE_INSERTS,
    };
    use windows::Win32::System::LibraryLoader::{
        LoadLibraryExW, LOAD_LIBRARY_AS_DATAFILE, LOAD_LIBRARY_AS_IMAGE_RESOURCE,
    };

    use super::{MessageTable, ModuleLoader, SystemLoader};
    use crate::util::error::{windows_err, LookupError};

    /// A module mapped as a resource-only data file. Unmapped on drop.
    struct LoadedModule {
        handle: HMODULE,
    }

    impl Drop for LoadedModule {
        fn drop(&mut self) {
            // SAFETY: handle came from LoadLibraryExW and is freed exactly once.
            unsafe {
                let _ = FreeLibrary(self.handle);
            }
        }
    }

    impl MessageTable for LoadedModule {
        fn raw_message(&self, code: u32, lang_id: u32) -> Option<String> {
            let mut buffer = PWSTR::null();

            // SAFETY: with FORMAT_MESSAGE_ALLOCATE_BUFFER the lpBuffer argument
            // is a pointer to a PWSTR which the system fills with a LocalAlloc'd
            // buffer. Inserts are ignored so no argument array is read.
            let len = unsafe {
                FormatMessageW(
                    FORMAT_MESSAGE_ALLOCATE_BUFFER
                        | FORMAT_MESSAGE_FROM_HMODULE
                        | FORMAT_MESSAGE_IGNORE_INSERTS,
                    Some(self.handle.0 as *const _),
                    code,
                    lang_id,
                    PWSTR(&mut buffer as *mut PWSTR as *mut u16),
                    0,
                    None,
                )
            };

            if len == 0 || buffer.is_null() {
                return None;
            }

            // SAFETY: FormatMessageW returned `len` UTF-16 units in `buffer`.
            let text = unsafe {
                let slice = std::slice::from_raw_parts(buffer.0, len as usize);
                String::from_utf16_lossy(slice)
            };

            // SAFETY: the buffer was allocated by FormatMessageW via LocalAlloc.
            unsafe {
                let _ = LocalFree(HLOCAL(buffer.0 as *mut _));
            }

            Some(text)
        }
    }

    impl ModuleLoader for SystemLoader {
        fn load(&self, path: &str) -> Result<Box<dyn MessageTable>, LookupError> {
            let wide = to_wide(path);
            // SAFETY: wide is a valid null-terminated UTF-16 string that
            // outlives the call.
            let handle = unsafe {
                LoadLibraryExW(
                    PCWSTR(wide.as_ptr()),
                    HANDLE::default(),
                    LOAD_LIBRARY_AS_DATAFILE | LOAD_LIBRARY_AS_IMAGE_RESOURCE,
                )
            }
            .map_err(|e| windows_err(e.code().0 as u32, format!("LoadLibraryExW {path}")))?;

            tracing::debug!("Loaded module {}", path);
            Ok(Box::new(LoadedModule { handle }))
        }
    }

    fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }
}

#[cfg(not(windows))]
impl ModuleLoader for SystemLoader {
    fn load(&self, path: &str) -> Result<Box<dyn MessageTable>, LookupError> {
        Err(LookupError::Unsupported(format!(
            "cannot load message table from {path}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory table keyed by `(code, lang_id)`.
    struct FakeTable(HashMap<(u32, u32), &'static str>);

    impl MessageTable for FakeTable {
        fn raw_message(&self, code: u32, lang_id: u32) -> Option<String> {
            self.0.get(&(code, lang_id)).map(|s| s.to_string())
        }
    }

    #[test]
    fn test_clean_message_trims_crlf_and_spaces() {
        assert_eq!(
            clean_message("Access is denied.\r\n").as_deref(),
            Some("Access is denied.")
        );
        assert_eq!(clean_message(" \r\n ok \r\n").as_deref(), Some("ok"));
        assert_eq!(clean_message("\r\n"), None);
    }

    #[test]
    fn test_clean_message_drops_insert_only_template() {
        assert_eq!(clean_message("%1\r\n"), None);
        assert_eq!(clean_message("%1 could not be found.\r\n"), None);
        // A template later in the text is a real message.
        assert!(clean_message("The file %1 is missing.").is_some());
    }

    #[test]
    fn test_falls_back_to_neutral_language() {
        let table = FakeTable(HashMap::from([((5, 0), "Access is denied.\r\n")]));
        assert_eq!(
            format_message(&table, 5, 0x0407).as_deref(),
            Some("Access is denied.")
        );
    }

    #[test]
    fn test_prefers_requested_language() {
        let table = FakeTable(HashMap::from([
            ((5, 0), "Access is denied.\r\n"),
            ((5, 0x0407), "Zugriff verweigert\r\n"),
        ]));
        assert_eq!(
            format_message(&table, 5, 0x0407).as_deref(),
            Some("Zugriff verweigert")
        );
    }

    #[test]
    fn test_template_in_preferred_language_is_not_retried() {
        let table = FakeTable(HashMap::from([
            ((7, 0), "Neutral text"),
            ((7, 0x0409), "%1"),
        ]));
        assert_eq!(format_message(&table, 7, 0x0409), None);
    }

    #[test]
    fn test_missing_everywhere() {
        let table = FakeTable(HashMap::new());
        assert_eq!(format_message(&table, 1, 0x0409), None);
        assert_eq!(format_message(&table, 1, 0), None);
    }

    #[cfg(windows)]
    #[test]
    fn test_system_loader_maps_kernel32() {
        let table = SystemLoader.load("kernel32.dll").unwrap();
        // ERROR_ACCESS_DENIED; message availability depends on installed MUI files.
        if let Some(msg) = format_message(table.as_ref(), 5, 0) {
            assert!(!msg.ends_with('\n'));
        }
        assert!(SystemLoader.load("no_such_module_12345.dll").is_err());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_system_loader_unsupported_off_windows() {
        assert!(matches!(
            SystemLoader.load("kernel32.dll"),
            Err(LookupError::Unsupported(_))
        ));
    }
}
