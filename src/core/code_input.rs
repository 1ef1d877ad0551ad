//! Parsing and formatting of the code typed into the input field.
//!
//! Codes are accepted in decimal or hexadecimal. A string made only of
//! decimal digits is read as decimal first; hex is the fallback for anything
//! carrying hex letters or a `0x` prefix. Negative decimals are read as
//! signed 32-bit values so `-2147024891` resolves to `0x80070005`.

use crate::util::error::LookupError;

/// Radix the user entered a code in. Stepping the code preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hex,
}

/// A code parsed from user input, plus the radix it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCode {
    pub value: u32,
    pub radix: Radix,
}

/// Parse the input field text into a code.
///
/// Empty (or whitespace-only) input is `0`.
///
/// # Errors
/// Returns [`LookupError::InvalidCode`] for text that is neither decimal nor
/// hexadecimal, or that does not fit in 32 bits.
pub fn parse_code(text: &str) -> Result<ParsedCode, LookupError> {
    let t = text.trim();
    if t.is_empty() {
        return Ok(ParsedCode {
            value: 0,
            radix: Radix::Decimal,
        });
    }

    let invalid = || LookupError::InvalidCode(t.to_string());

    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        return Ok(ParsedCode {
            value,
            radix: Radix::Hex,
        });
    }

    if let Some(digits) = t.strip_prefix('-') {
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let signed: i32 = t.parse().map_err(|_| invalid())?;
        return Ok(ParsedCode {
            value: signed as u32,
            radix: Radix::Decimal,
        });
    }

    if t.chars().all(|c| c.is_ascii_digit()) {
        let value: u32 = t.parse().map_err(|_| invalid())?;
        return Ok(ParsedCode {
            value,
            radix: Radix::Decimal,
        });
    }

    if t.chars().all(|c| c.is_ascii_hexdigit()) {
        let value = u32::from_str_radix(t, 16).map_err(|_| invalid())?;
        return Ok(ParsedCode {
            value,
            radix: Radix::Hex,
        });
    }

    Err(invalid())
}

/// Format a code in the given radix: `2147942405` or `0x80070005`.
pub fn format_code(value: u32, radix: Radix) -> String {
    match radix {
        Radix::Decimal => value.to_string(),
        Radix::Hex => format!("0x{value:08X}"),
    }
}

/// Add `delta` to the code in `text` and format it back in the same radix.
///
/// Unparseable input steps from `0` in decimal. Arithmetic wraps at 32 bits
/// in both directions.
pub fn step_code(text: &str, delta: i32) -> String {
    let parsed = parse_code(text).unwrap_or(ParsedCode {
        value: 0,
        radix: Radix::Decimal,
    });
    format_code(parsed.value.wrapping_add_signed(delta), parsed.radix)
}
