//! Core domain modules for ErrorLookup.
//!
//! Contains code parsing and decomposition, the XML database, message-table
//! access, the module registry, the lookup pass, and persisted settings.

pub mod code_input;
pub mod database;
pub mod hresult;
pub mod lookup;
pub mod message_table;
pub mod module_set;
pub mod settings;
