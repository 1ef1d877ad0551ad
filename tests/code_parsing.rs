//! Integration tests for code input and field decomposition.

use errorlookup::core::code_input::{parse_code, step_code, Radix};
use errorlookup::core::hresult::CodeFields;

#[test]
fn negative_decimal_matches_hex_form() {
    let neg = parse_code("-2147024891").unwrap();
    let hex = parse_code("0x80070005").unwrap();
    assert_eq!(neg.value, hex.value);
    assert_eq!(neg.radix, Radix::Decimal);
    assert_eq!(hex.radix, Radix::Hex);
}

#[test]
fn bare_hex_letters_parse_as_hex() {
    let p = parse_code("8007000E").unwrap();
    assert_eq!(p.value, 0x8007_000E);
    assert_eq!(p.radix, Radix::Hex);
}

#[test]
fn decimal_digits_win_over_hex() {
    assert_eq!(parse_code("10").unwrap().value, 10);
}

#[test]
fn overflow_is_rejected() {
    assert!(parse_code("0x100000000").is_err());
    assert!(parse_code("4294967296").is_err());
}

#[test]
fn stepping_wraps_and_decomposes() {
    let next = step_code("0xFFFFFFFF", 1);
    assert_eq!(next, "0x00000000");
    let f = CodeFields::decompose(parse_code(&step_code("0x80070004", 1)).unwrap().value);
    assert_eq!(f.severity, 2);
    assert_eq!(f.facility, 7);
    assert_eq!(f.status, 5);
    assert!(f.is_failure());
}
