//! Fixed-point amount conversion.
//!
//! Ledger amounts travel on the wire as integer counts of the smallest asset
//! unit, scaled by 10^7. Callers and result payloads work with human-scale
//! decimal strings, so every amount crossing the API boundary goes through
//! this module.

use rust_decimal::Decimal;

/// Number of decimal places in the ledger's fixed-point representation.
pub const AMOUNT_SCALE: u32 = 7;

/// Smallest-unit count that makes up one whole unit of any asset.
pub const UNITS_PER_WHOLE: u64 = 10_000_000;

/// Convert a raw fixed-point amount to a `Decimal`.
///
/// Exact for the full 64-bit range; a raw value of `1` becomes `0.0000001`.
#[must_use]
pub fn to_decimal(raw: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(raw), AMOUNT_SCALE).normalize()
}

/// Convert a raw fixed-point amount to its canonical decimal string.
///
/// Trailing fractional zeros are stripped and zero renders as `"0"`.
#[must_use]
pub fn to_decimal_string(raw: u64) -> String {
    to_decimal(raw).to_string()
}

/// Convert an accumulated 128-bit total of raw units to a decimal string.
///
/// Totals are summed across claimed offers in 128 bits so individual 64-bit
/// amounts can never overflow the accumulator. Returns `None` if the total
/// exceeds what a `Decimal` mantissa can hold exactly.
pub(crate) fn total_to_decimal_string(raw: u128) -> Option<String> {
    let raw = i128::try_from(raw).ok()?;
    Decimal::try_from_i128_with_scale(raw, AMOUNT_SCALE)
        .ok()
        .map(|d| d.normalize().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;
    use test_case::test_case;

    #[test_case(0, "0" ; "zero")]
    #[test_case(1, "0.0000001" ; "one_raw_unit")]
    #[test_case(100_000_000, "10" ; "ten_whole")]
    #[test_case(10_000_000, "1" ; "one_whole")]
    #[test_case(123_456_789, "12.3456789" ; "mixed_fraction")]
    #[test_case(50_000_000, "5" ; "five_whole")]
    #[test_case(20_000_000, "2" ; "two_whole")]
    #[test_case(u64::MAX, "1844674407370.9551615" ; "u64_max")]
    fn converts_raw_units(raw: u64, expected: &str) {
        assert_eq!(to_decimal_string(raw), expected);
    }

    #[test]
    fn i64_max_is_exact() {
        let raw = i64::MAX as u64;
        assert_eq!(to_decimal_string(raw), "922337203685.4775807");
    }

    #[test]
    fn total_conversion_handles_sums_beyond_u64() {
        let total = u128::from(u64::MAX) + u128::from(u64::MAX);
        assert_eq!(
            total_to_decimal_string(total).as_deref(),
            Some("3689348814741.910323")
        );
    }

    proptest! {
        #[test]
        fn round_trips_through_decimal(raw in 0u64..=i64::MAX as u64) {
            let rendered = to_decimal_string(raw);
            let parsed = Decimal::from_str(&rendered).unwrap();
            let scaled = parsed * Decimal::from(UNITS_PER_WHOLE);
            prop_assert_eq!(scaled, Decimal::from(raw));
        }
    }
}
