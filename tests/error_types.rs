//! Integration tests for error type construction and display.

use errorlookup::util::error::{windows_err, LookupError};

#[test]
fn windows_api_error_displays_hex_hresult() {
    let err = windows_err(0x8007007E, "LoadLibraryExW netmsg.dll");
    let msg = err.to_string();
    assert!(
        msg.contains("8007007E"),
        "Error message should contain hex HRESULT: {msg}"
    );
    assert!(
        msg.contains("LoadLibraryExW netmsg.dll"),
        "Error message should contain context: {msg}"
    );
}

#[test]
fn invalid_code_echoes_input() {
    let err = errorlookup::core::code_input::parse_code("0xNOPE").unwrap_err();
    assert!(matches!(err, LookupError::InvalidCode(_)));
    assert!(err.to_string().contains("0xNOPE"), "{err}");
}

#[test]
fn xml_parse_error_preserves_message() {
    let err = LookupError::XmlParse("unexpected EOF at line 42".into());
    assert!(err.to_string().contains("unexpected EOF"));
}

#[test]
fn module_index_error_names_index() {
    let err = LookupError::ModuleIndex(17);
    assert!(err.to_string().contains("17"));
}

#[test]
fn io_error_converts() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no access");
    let err: LookupError = io_err.into();
    assert!(err.to_string().contains("no access"));
}

#[test]
fn error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    // Errors cross the export thread's channel as text, but keep the type thread-safe.
    assert_send_sync::<LookupError>();
}
