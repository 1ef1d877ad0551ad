//! Saving lookup results to disk.

pub mod csv_export;
pub mod json_export;
