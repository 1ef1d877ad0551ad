//! Integration tests for ErrorLookup.
//!
//! These exercise the library modules together: code parsing, the bundled
//! database, lookups without any loaded module, and export. Module loading
//! itself needs Windows and is covered by the unit tests in
//! `core::message_table`.

mod code_parsing;
mod error_types;
mod time_utils;
