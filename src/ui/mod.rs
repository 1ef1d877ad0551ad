//! UI sub-modules for ErrorLookup.
//!
//! Each sub-module adds rendering methods to [`crate::app::ErrorLookupApp`]
//! via `impl` blocks, keeping UI code separated from state management.

pub mod description_panel;
pub mod match_list;
pub mod status_bar;
pub mod theme;
pub mod toolbar;
