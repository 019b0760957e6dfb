//! Canonical display strings for numeric results

use crate::core::Constant;

/// Fractional digits kept by [`format_number`]
pub const DEFAULT_PRECISION: usize = 10;

/// Formats a result with [`DEFAULT_PRECISION`]
///
/// ```
/// use scicalc::core::format::format_number;
///
/// assert_eq!(format_number(2.0 / 3.0), "0.6666666667");
/// assert_eq!(format_number(14.0), "14");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    format_with_precision(value, DEFAULT_PRECISION)
}

/// Rounds to `precision` fractional digits and strips trailing zeros
///
/// Output is always fixed-point. Negative zero prints as `0`; non-finite
/// values print as `NaN`, `Infinity` and `-Infinity`.
#[must_use]
pub fn format_with_precision(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let fixed = format!("{value:.precision$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Reads the number a display string stands for
///
/// Accepts partial literals as typed (`"5."`, `"-0.25"`) and the constant
/// glyphs. Returns `None` for the error sentinel or anything else.
#[must_use]
pub fn parse_display_number(text: &str) -> Option<f64> {
    if let Some(constant) = Constant::from_name(text) {
        return Some(constant.value());
    }

    let digits = text.strip_prefix('-').unwrap_or(text);
    let well_formed = !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;
    if !well_formed {
        return None;
    }

    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integer() {
        assert_eq!(format_number(420.0), "420");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_two_thirds() {
        let s = format_number(2.0 / 3.0);
        assert_eq!(s, "0.6666666667");
        let fraction = s.split('.').nth(1).unwrap();
        assert!(fraction.len() <= 10);
        assert!(!fraction.ends_with('0'));
    }

    #[test]
    fn test_format_hides_float_noise() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_format_strips_trailing_zeros() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.250), "1.25");
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-0.000_000_000_01), "0");
    }

    #[test]
    fn test_format_large_values_stay_fixed_point() {
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert!(!format_number(123_456_789_012.5).contains('e'));
    }

    #[test]
    fn test_format_tiny_values_round_to_zero() {
        assert_eq!(format_number(1e-12), "0");
        assert_eq!(format_number(1.7e-10), "0.0000000002");
    }

    #[test]
    fn test_format_special_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_custom_precision() {
        assert_eq!(format_with_precision(2.0 / 3.0, 4), "0.6667");
        assert_eq!(format_with_precision(2.6, 0), "3");
    }

    #[test]
    fn test_parse_display_number() {
        assert_eq!(parse_display_number("42"), Some(42.0));
        assert_eq!(parse_display_number("5."), Some(5.0));
        assert_eq!(parse_display_number("-0.25"), Some(-0.25));
        assert_eq!(parse_display_number("π"), Some(std::f64::consts::PI));
        assert_eq!(parse_display_number("e"), Some(std::f64::consts::E));
    }

    #[test]
    fn test_parse_display_number_rejects_non_numbers() {
        assert_eq!(parse_display_number("Error"), None);
        assert_eq!(parse_display_number(""), None);
        assert_eq!(parse_display_number("."), None);
        assert_eq!(parse_display_number("inf"), None);
        assert_eq!(parse_display_number("NaN"), None);
        assert_eq!(parse_display_number("1.2.3"), None);
    }
}
