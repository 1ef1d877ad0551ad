//! Timestamp formatting helpers for ErrorLookup.

use chrono::{DateTime, Local, Utc};

/// Format a UTC timestamp as local `HH:MM:SS` for the status bar.
pub fn format_status_time(ts: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = ts.with_timezone(&Local);
    local.format("%H:%M:%S").to_string()
}

/// Format a UTC timestamp for export file names, e.g. `20240115_102345`.
///
/// Uses local time so the name matches what the user sees on their clock.
pub fn format_file_stamp(ts: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = ts.with_timezone(&Local);
    local.format("%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_stamp_has_no_separators_a_filesystem_rejects() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 23, 45).unwrap();
        let s = format_file_stamp(&ts);
        assert_eq!(s.len(), 15);
        assert!(!s.contains(':'));
        assert!(!s.contains('/'));
    }

    #[test]
    fn status_time_is_clock_shaped() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let s = format_status_time(&ts);
        assert_eq!(s.len(), 8);
        assert_eq!(s.matches(':').count(), 2);
    }
}
