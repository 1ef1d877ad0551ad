//! Integration tests for time utilities.

use chrono::{TimeZone, Utc};
use errorlookup::util::time::{format_file_stamp, format_status_time};

#[test]
fn file_stamp_is_digits_and_underscore() {
    let ts = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 1).unwrap();
    let s = format_file_stamp(&ts);
    assert_eq!(s.len(), 15);
    assert_eq!(s.chars().nth(8), Some('_'));
    assert!(s.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
}

#[test]
fn status_time_has_three_fields() {
    let ts = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
    let s = format_status_time(&ts);
    assert_eq!(s.split(':').count(), 3);
}
