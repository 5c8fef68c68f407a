//! Money parsing and formatting.
//!
//! Amounts are exact decimals in memory and whole minor units (hundredths) in storage.
//! Text input is validated strictly: anything that is not a plain non-negative decimal with
//! at most two fractional digits is rejected instead of being read as zero.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

/// Number of fractional digits carried by every stored amount
pub const MONEY_SCALE: u32 = 2;

fn invalid(input: &str, reason: &str) -> Error {
    Error::InvalidAmount {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

/// Parses a non-negative amount such as `"1000"`, `"249.5"` or `"0.75"`.
///
/// Signs, exponents, digit separators and more than two decimal places are rejected.
pub fn parse_amount(text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid(text, "amount is required"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid(text, "must be a plain number like 1250 or 1250.50"));
    }
    if trimmed.matches('.').count() > 1 || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid(text, "must be a plain number like 1250 or 1250.50"));
    }

    let value = Decimal::from_str(trimmed).map_err(|e| invalid(text, &e.to_string()))?;
    check_amount(value)
}

/// Accepts an already-typed amount if it is non-negative with at most two decimal places
/// and fits in whole minor units.
pub fn check_amount(amount: Decimal) -> Result<Decimal> {
    let input = amount.to_string();
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(invalid(&input, "must not be negative"));
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(invalid(&input, "at most two decimal places are allowed"));
    }
    to_minor(amount)?;
    Ok(amount)
}

/// Parses an amount that must be strictly greater than zero.
pub fn parse_positive_amount(text: &str) -> Result<Decimal> {
    let value = parse_amount(text)?;
    if value.is_zero() {
        return Err(invalid(text, "must be greater than zero"));
    }
    Ok(value)
}

/// Converts an amount to whole minor units.
///
/// Amounts whose minor units do not fit in an `i64` are rejected.
pub fn to_minor(amount: Decimal) -> Result<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.round().to_i64())
        .ok_or_else(|| invalid(&amount.to_string(), "amount is too large"))
}

/// Converts whole minor units back to an amount with two decimal places.
#[must_use]
pub fn from_minor(minor: i64) -> Decimal {
    Decimal::new(minor, MONEY_SCALE)
}

/// Formats an amount in rupees with Indian digit grouping, e.g. `₹1,23,456.00`.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp(MONEY_SCALE);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}₹{}.{fraction}", group_indian(whole))
}

/// Groups the last three digits, then every two: `1234567` becomes `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount_plain_numbers() -> Result<()> {
        assert_eq!(parse_amount("1000")?, dec!(1000));
        assert_eq!(parse_amount(" 249.5 ")?, dec!(249.5));
        assert_eq!(parse_amount("0.75")?, dec!(0.75));
        assert_eq!(parse_amount("0")?, dec!(0));
        Ok(())
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        for input in ["", "   ", "abc", "12a", "1,000", "1e3", "-5", "+5", "1.2.3", ".", "1_000"] {
            assert!(
                matches!(parse_amount(input), Err(Error::InvalidAmount { .. })),
                "expected '{input}' to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_amount_rejects_sub_minor_precision() {
        assert!(matches!(
            parse_amount("10.005"),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_check_amount() {
        assert!(check_amount(dec!(10.50)).is_ok());
        assert!(check_amount(dec!(10.500)).is_ok());
        assert!(matches!(
            check_amount(dec!(-1)),
            Err(Error::InvalidAmount { .. })
        ));
        assert!(matches!(
            check_amount(dec!(0.001)),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_parse_amount_rejects_oversized_values() {
        for input in ["1000000000000000000000000000", "92233720368547758.08"] {
            assert!(
                matches!(parse_amount(input), Err(Error::InvalidAmount { .. })),
                "expected '{input}' to be rejected"
            );
        }
        // the largest amount that still fits in minor units
        assert_eq!(
            parse_amount("92233720368547758.07").unwrap(),
            dec!(92233720368547758.07)
        );
    }

    #[test]
    fn test_to_minor_rejects_overflow() {
        assert!(matches!(
            to_minor(Decimal::MAX),
            Err(Error::InvalidAmount { reason, .. }) if reason == "amount is too large"
        ));
        assert!(matches!(
            check_amount(dec!(100000000000000000000)),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_parse_positive_amount_rejects_zero() {
        assert!(matches!(
            parse_positive_amount("0.00"),
            Err(Error::InvalidAmount { .. })
        ));
        assert!(parse_positive_amount("0.01").is_ok());
    }

    #[test]
    fn test_minor_unit_conversion() -> Result<()> {
        assert_eq!(to_minor(dec!(1250.50))?, 125_050);
        assert_eq!(to_minor(dec!(0.07))?, 7);
        assert_eq!(from_minor(125_050), dec!(1250.50));
        assert_eq!(from_minor(-10_000), dec!(-100.00));
        assert_eq!(from_minor(0), Decimal::ZERO);
        Ok(())
    }

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(dec!(0)), "₹0.00");
        assert_eq!(format_inr(dec!(250)), "₹250.00");
        assert_eq!(format_inr(dec!(1200.5)), "₹1,200.50");
        assert_eq!(format_inr(dec!(123456)), "₹1,23,456.00");
        assert_eq!(format_inr(dec!(12345678.9)), "₹1,23,45,678.90");
    }

    #[test]
    fn test_format_inr_negative() {
        assert_eq!(format_inr(dec!(-100)), "-₹100.00");
        assert_eq!(format_inr(dec!(-1500.25)), "-₹1,500.25");
    }
}
