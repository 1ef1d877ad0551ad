//! Bit-field decomposition of a 32-bit Windows status code.
//!
//! ```text
//!  3 3 2 2 2 2 2 2 2 2 2 2 1 1 1 1 1 1 1 1 1 1
//!  1 0 9 8 7 6 5 4 3 2 1 0 9 8 7 6 5 4 3 2 1 0 9 8 7 6 5 4 3 2 1 0
//! +---+-+-+-----------------------+-------------------------------+
//! |Sev|C|R|     Facility          |               Code            |
//! +---+-+-+-----------------------+-------------------------------+
//! ```
//!
//! Severity is read as the two top bits (0 = success, 1 = informational,
//! 2 = warning, 3 = error) so it indexes the four-entry severity table.
//! The facility uses the SDK's 13-bit `HRESULT_FACILITY` mask.

use crate::util::constants::FACILITY_MASK;

/// The fields of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CodeFields {
    /// The full code.
    pub code: u32,
    /// Bits 31..30.
    pub severity: u32,
    /// Bit 29: set for customer-defined codes.
    pub customer: bool,
    /// Bits 28..16.
    pub facility: u32,
    /// Bits 15..0.
    pub status: u32,
}

impl CodeFields {
    pub fn decompose(code: u32) -> Self {
        Self {
            code,
            severity: code >> 30,
            customer: code & (1 << 29) != 0,
            facility: (code >> 16) & FACILITY_MASK,
            status: code & 0xFFFF,
        }
    }

    /// `true` when bit 31 is set, which is how `FAILED()` reads an HRESULT.
    pub fn is_failure(&self) -> bool {
        self.code & 0x8000_0000 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_hresult() {
        let f = CodeFields::decompose(0x8007_0005);
        assert_eq!(f.severity, 2);
        assert!(!f.customer);
        assert_eq!(f.facility, 7);
        assert_eq!(f.status, 5);
        assert!(f.is_failure());
    }

    #[test]
    fn test_ntstatus_access_violation() {
        let f = CodeFields::decompose(0xC000_0005);
        assert_eq!(f.severity, 3);
        assert_eq!(f.facility, 0);
        assert_eq!(f.status, 5);
    }

    #[test]
    fn test_plain_win32_code_is_success_null_facility() {
        let f = CodeFields::decompose(2);
        assert_eq!(f.severity, 0);
        assert_eq!(f.facility, 0);
        assert_eq!(f.status, 2);
        assert!(!f.is_failure());
    }

    #[test]
    fn test_customer_bit_and_wide_facility() {
        // DXGI_ERROR_DEVICE_REMOVED: facility 0x87A needs the full 13-bit mask.
        let f = CodeFields::decompose(0x887A_0005);
        assert_eq!(f.facility, 0x87A);
        assert!(!f.customer);

        let c = CodeFields::decompose(0xA000_0001);
        assert!(c.customer);
        assert_eq!(c.severity, 2);
    }
}
