//! Peso amounts: display formatting and lenient parsing.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end; these helpers only convert
//! to and from the Argentine display form (`1.234.567,5`).

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Maximum number of decimals shown for a peso amount.
pub const PESO_DECIMALS: u32 = 2;

const GROUP_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Formats an amount the way es-AR renders pesos.
///
/// Thousands are grouped with `.`, decimals use `,`, trailing zero decimals
/// are dropped and at most [`PESO_DECIMALS`] are kept.
///
/// ```
/// use rust_decimal_macros::dec;
/// use yoanoto_shared::types::format_pesos;
///
/// assert_eq!(format_pesos(dec!(1234567)), "1.234.567");
/// assert_eq!(format_pesos(dec!(1500.50)), "1.500,5");
/// ```
#[must_use]
pub fn format_pesos(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(PESO_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if rounded.is_zero() {
        return "0".to_string();
    }

    let magnitude = rounded.abs();
    let whole = magnitude.trunc();
    let fraction = (magnitude - whole).normalize();

    let mut out = String::new();
    if rounded.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_thousands(&whole.to_string()));
    if !fraction.is_zero() {
        let digits = fraction.to_string();
        if let Some(decimals) = digits.strip_prefix("0.") {
            out.push(DECIMAL_SEPARATOR);
            out.push_str(decimals);
        }
    }
    out
}

/// Parses a peso string typed by a user back into an amount.
///
/// Grouping dots are discarded and a decimal comma becomes the decimal point.
/// Like a browser's `parseFloat`, only the leading numeric part is read; input
/// with no numeric prefix yields zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use yoanoto_shared::types::parse_pesos;
///
/// assert_eq!(parse_pesos("1.234.567"), dec!(1234567));
/// assert_eq!(parse_pesos("abc"), dec!(0));
/// ```
#[must_use]
pub fn parse_pesos(input: &str) -> Decimal {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != GROUP_SEPARATOR)
        .map(|c| if c == DECIMAL_SEPARATOR { '.' } else { c })
        .collect();

    let numeric = leading_number(&cleaned);
    Decimal::from_str(numeric).unwrap_or(Decimal::ZERO)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Longest prefix of the form `[+-]?digits[.digits]`.
fn leading_number(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if has_digits { &s[..end] } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::zero(dec!(0), "0")]
    #[case::small(dec!(999), "999")]
    #[case::thousand(dec!(1000), "1.000")]
    #[case::million(dec!(1234567), "1.234.567")]
    #[case::trailing_zero_scale(dec!(300.00), "300")]
    #[case::one_decimal(dec!(1500.50), "1.500,5")]
    #[case::two_decimals(dec!(12.34), "12,34")]
    #[case::rounds_half_up(dec!(33.335), "33,34")]
    #[case::thirds(dec!(33.333333), "33,33")]
    #[case::negative(dec!(-2500), "-2.500")]
    #[case::tiny_negative_rounds_to_zero(dec!(-0.001), "0")]
    fn test_format_pesos(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_pesos(amount), expected);
    }

    #[rstest]
    #[case::plain("1500", dec!(1500))]
    #[case::grouped("1.234.567", dec!(1234567))]
    #[case::decimal_comma("1.500,75", dec!(1500.75))]
    #[case::surrounding_space("  42 ", dec!(42))]
    #[case::numeric_prefix("120 pesos", dec!(120))]
    #[case::negative("-3,5", dec!(-3.5))]
    #[case::garbage("abc", dec!(0))]
    #[case::empty("", dec!(0))]
    #[case::sign_only("-", dec!(0))]
    fn test_parse_pesos(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_pesos(input), expected);
    }

    #[test]
    fn test_format_then_parse_keeps_whole_amounts() {
        for amount in [dec!(1), dec!(15000), dec!(987654321)] {
            assert_eq!(parse_pesos(&format_pesos(amount)), amount);
        }
    }
}
