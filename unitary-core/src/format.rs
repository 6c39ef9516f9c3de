//! Numeric formatting and locale-aware parsing
//!
//! Turns user-typed strings into exact [`Number`]s and engine output back
//! into display strings. Values between 10^-6 (inclusive) and 10^22
//! (exclusive) render in fixed-point; everything else, including zero,
//! renders in normalized scientific notation, with zero collapsed to `"0"`.

use serde::{Deserialize, Serialize};
use crate::Number;

/// Smallest decimal exponent rendered in fixed-point (|v| >= 10^-6)
pub const FIXED_MIN_EXPONENT: isize = -6;

/// First decimal exponent rendered in scientific notation (|v| >= 10^22)
pub const FIXED_MAX_EXPONENT: isize = 22;

/// Default number of fraction digits in fixed-point output
pub const DEFAULT_FRACTION_DIGITS: usize = 10;

/// Default number of mantissa fraction digits in scientific output
pub const DEFAULT_MANTISSA_DIGITS: usize = 10;

/// Languages whose default decimal separator is a comma
const COMMA_LANGUAGES: &[&str] = &[
    "az", "be", "bg", "ca", "cs", "da", "de", "el", "es", "et", "fi", "fr",
    "hr", "hu", "id", "is", "it", "kk", "lt", "lv", "nb", "nl", "nn", "no",
    "pl", "pt", "ro", "ru", "sk", "sl", "sr", "sv", "tr", "uk", "vi",
];

/// Regions that use a period even though their language usually doesn't
const PERIOD_REGIONS: &[(&str, &str)] = &[
    ("de", "ch"),
    ("it", "ch"),
    ("es", "mx"),
    ("es", "us"),
];

/// Decimal-separator convention used for parsing and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    decimal_separator: char,
}

impl Locale {
    /// Period separator ("1234.5")
    pub const POSIX: Locale = Locale { decimal_separator: '.' };

    /// Comma separator ("1234,5")
    pub const COMMA: Locale = Locale { decimal_separator: ',' };

    pub const fn with_separator(decimal_separator: char) -> Self {
        Locale { decimal_separator }
    }

    /// Resolve a BCP 47 style tag such as `"de-DE"`, `"pt_BR"` or `"en"`.
    /// Unknown tags fall back to the period separator.
    pub fn from_tag(tag: &str) -> Self {
        let lower = tag.trim().to_ascii_lowercase();
        let mut parts = lower.split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        let region = parts.find(|p| p.len() == 2).unwrap_or_default();

        if PERIOD_REGIONS.iter().any(|&(l, r)| l == language && r == region) {
            return Self::POSIX;
        }
        if COMMA_LANGUAGES.contains(&language) {
            Self::COMMA
        } else {
            Self::POSIX
        }
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::POSIX
    }
}

/// Converts between display strings and exact numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericFormatter {
    fraction_digits: usize,
    mantissa_digits: usize,
}

impl NumericFormatter {
    pub const fn new() -> Self {
        Self {
            fraction_digits: DEFAULT_FRACTION_DIGITS,
            mantissa_digits: DEFAULT_MANTISSA_DIGITS,
        }
    }

    /// No rounding at all; renders every digit the value carries
    pub const fn exact() -> Self {
        Self {
            fraction_digits: usize::MAX,
            mantissa_digits: usize::MAX,
        }
    }

    /// Builder: maximum fraction digits in fixed-point output
    pub const fn with_fraction_digits(mut self, digits: usize) -> Self {
        self.fraction_digits = digits;
        self
    }

    /// Builder: maximum mantissa fraction digits in scientific output
    pub const fn with_mantissa_digits(mut self, digits: usize) -> Self {
        self.mantissa_digits = digits;
        self
    }

    /// Parse user input. Returns `None` on anything malformed, never panics.
    ///
    /// Accepts the locale's decimal separator, an optional leading `-` and
    /// an optional `e`/`E` exponent (which may itself be negative).
    /// Surrounding whitespace is ignored.
    pub fn parse(&self, text: &str, locale: &Locale) -> Option<Number> {
        Number::parse_decimal(text.trim(), locale.decimal_separator())
    }

    /// Render with a period separator
    pub fn format(&self, value: &Number) -> String {
        let (negative, digits, exponent) = value.to_decimal_parts();

        let significant = digits.trim_end_matches('0');
        if significant.is_empty() {
            return "0".to_string();
        }
        let exponent = exponent.saturating_add((digits.len() - significant.len()) as isize);
        let magnitude = exponent.saturating_add(significant.len() as isize - 1);

        let body = if (FIXED_MIN_EXPONENT..FIXED_MAX_EXPONENT).contains(&magnitude) {
            self.fixed(significant, exponent)
        } else {
            self.scientific(significant, magnitude)
        };

        if negative && body != "0" {
            format!("-{}", body)
        } else {
            body
        }
    }

    /// Render with the locale's decimal separator
    pub fn format_localized(&self, value: &Number, locale: &Locale) -> String {
        let text = self.format(value);
        match locale.decimal_separator() {
            '.' => text,
            sep => text.replace('.', &sep.to_string()),
        }
    }

    fn fixed(&self, digits: &str, exponent: isize) -> String {
        let (int_part, frac_part) = if exponent >= 0 {
            (format!("{}{}", digits, "0".repeat(exponent as usize)), String::new())
        } else {
            let scale = exponent.unsigned_abs();
            if digits.len() > scale {
                let split = digits.len() - scale;
                (digits[..split].to_string(), digits[split..].to_string())
            } else {
                ("0".to_string(), format!("{}{}", "0".repeat(scale - digits.len()), digits))
            }
        };

        let (int_part, frac_part) = if frac_part.len() > self.fraction_digits {
            let combined = format!("{}{}", int_part, frac_part);
            let (rounded, grew) = round_half_up(&combined, int_part.len().saturating_add(self.fraction_digits));
            let int_len = int_part.len() + usize::from(grew);
            (rounded[..int_len].to_string(), rounded[int_len..].to_string())
        } else {
            (int_part, frac_part)
        };

        let int_part = match int_part.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };
        let frac_part = frac_part.trim_end_matches('0');

        if frac_part.is_empty() {
            int_part.to_string()
        } else {
            format!("{}.{}", int_part, frac_part)
        }
    }

    fn scientific(&self, digits: &str, magnitude: isize) -> String {
        let (rounded, grew) = round_half_up(digits, self.mantissa_digits.saturating_add(1));
        let magnitude = magnitude.saturating_add(isize::from(grew));

        let (lead, rest) = rounded.split_at(1);
        let rest = rest.trim_end_matches('0');
        if rest.is_empty() {
            format!("{}e{}", lead, magnitude)
        } else {
            format!("{}.{}e{}", lead, rest, magnitude)
        }
    }
}

impl Default for NumericFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the first `keep` digits, rounding half away from zero.
/// The flag reports a carry that lengthened the result by one digit.
fn round_half_up(digits: &str, keep: usize) -> (String, bool) {
    let bytes = digits.as_bytes();
    if bytes.len() <= keep {
        return (digits.to_string(), false);
    }

    let mut kept = bytes[..keep].to_vec();
    if bytes[keep] < b'5' {
        return (collect_digits(&kept), false);
    }

    for d in kept.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return (collect_digits(&kept), false);
        }
    }

    kept.insert(0, b'1');
    (collect_digits(&kept), true)
}

fn collect_digits(digits: &[u8]) -> String {
    digits.iter().map(|&b| b as char).collect()
}

/// Parse with the default formatter
pub fn parse(text: &str, locale: &Locale) -> Option<Number> {
    NumericFormatter::new().parse(text, locale)
}

/// Format with the default formatter
pub fn format(value: &Number) -> String {
    NumericFormatter::new().format(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        Number::from_str(s).unwrap()
    }

    #[test]
    fn test_fixed_integer() {
        assert_eq!(format(&num("1000")), "1000");
        assert_eq!(format(&num("-42")), "-42");
    }

    #[test]
    fn test_fixed_trims_trailing_zeros() {
        assert_eq!(format(&num("2.5000")), "2.5");
        assert_eq!(format(&num("1609.344")), "1609.344");
    }

    #[test]
    fn test_fixed_rounds_to_ten_places() {
        assert_eq!(format(&num("0.12345678905")), "0.1234567891");
        assert_eq!(format(&num("0.33333333333333")), "0.3333333333");
    }

    #[test]
    fn test_fixed_rounding_carries_into_integer() {
        assert_eq!(format(&num("9.99999999999")), "10");
        assert_eq!(format(&num("-0.99999999999")), "-1");
    }

    #[test]
    fn test_small_value_is_scientific() {
        assert_eq!(format(&num("0.0000005")), "5e-7");
        assert_eq!(format(&num("-0.00000012345")), "-1.2345e-7");
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(format(&num("0.000001")), "0.000001");
        assert_eq!(format(&num("9999999999999999999999")), "9999999999999999999999");
        assert_eq!(format(&num("1e22")), "1e22");
    }

    #[test]
    fn test_large_value_is_scientific() {
        assert_eq!(format(&num("30856775814913673")), "30856775814913673");
        assert_eq!(format(&num("123456789e20")), "1.23456789e28");
    }

    #[test]
    fn test_mantissa_rounding_carries_exponent() {
        assert_eq!(format(&num("9.999999999999e30")), "1e31");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format(&Number::from_i64(0)), "0");
        assert_eq!(format(&num("-0")), "0");
        assert_eq!(format(&num("0.000")), "0");
    }

    #[test]
    fn test_custom_fraction_digits() {
        let f = NumericFormatter::new().with_fraction_digits(2);
        assert_eq!(f.format(&num("3.14159")), "3.14");
        assert_eq!(f.format(&num("0.004")), "0");
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse("12.5", &Locale::POSIX), Some(num("12.5")));
        assert_eq!(parse("-3", &Locale::POSIX), Some(num("-3")));
        assert_eq!(parse("  7 ", &Locale::POSIX), Some(num("7")));
        assert_eq!(parse(".5", &Locale::POSIX), Some(num("0.5")));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse("1.5e3", &Locale::POSIX), Some(num("1500")));
        assert_eq!(parse("2E-2", &Locale::POSIX), Some(num("0.02")));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "-", "abc", "1.2.3", "1e", "e5", "+1", "1,000.5", "1 000", "--1", "1e+5", "0x10"] {
            assert_eq!(parse(bad, &Locale::POSIX), None, "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_parse_rejects_oversized_exponent() {
        for bad in ["9e9223372036854775807", "1e-9223372036854775808", "1e10001", "1e99999999999999999999"] {
            assert_eq!(parse(bad, &Locale::POSIX), None, "accepted {:?}", bad);
        }
        assert_eq!(parse("1e10000", &Locale::POSIX), Some(num("1e10000")));
    }

    #[test]
    fn test_extreme_exponents_format() {
        assert_eq!(format(&num("9e10000")), "9e10000");
        assert_eq!(format(&num("-2.5e-10000")), "-2.5e-10000");
        let big = num("1e10000").mul(&num("1e10000"));
        assert_eq!(format(&big), "1e20000");
    }

    #[test]
    fn test_exact_formatter() {
        let exact = NumericFormatter::exact();
        assert_eq!(exact.format(&num("0.12345678901234567")), "0.12345678901234567");
        assert_eq!(exact.format(&num("1.2345678901234e30")), "1.2345678901234e30");
        assert_eq!(exact.format(&num("1000")), "1000");
    }

    #[test]
    fn test_parse_comma_locale() {
        let de = Locale::from_tag("de-DE");
        assert_eq!(de.decimal_separator(), ',');
        assert_eq!(parse("1,25", &de), Some(num("1.25")));
        assert_eq!(parse("1.25", &de), None);
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("en-US"), Locale::POSIX);
        assert_eq!(Locale::from_tag("fr"), Locale::COMMA);
        assert_eq!(Locale::from_tag("pt_BR"), Locale::COMMA);
        assert_eq!(Locale::from_tag("de-CH"), Locale::POSIX);
        assert_eq!(Locale::from_tag("es-MX"), Locale::POSIX);
        assert_eq!(Locale::from_tag(""), Locale::POSIX);
    }

    #[test]
    fn test_format_localized() {
        let de = Locale::from_tag("de");
        assert_eq!(NumericFormatter::new().format_localized(&num("0.5"), &de), "0,5");
        assert_eq!(NumericFormatter::new().format_localized(&num("0.00000025"), &de), "2,5e-7");
    }

    #[test]
    fn test_parse_format_round_trip() {
        let text = "1609.344";
        let value = parse(text, &Locale::POSIX).unwrap();
        assert_eq!(format(&value), text);
    }
}
