use rust_decimal::Decimal;
use std::str::FromStr;

/// Convert a German-formatted number into a canonical decimal-point string.
///
/// - "3.350,50" -> "3350.50" (last comma is the decimal separator)
/// - "3.350.000" -> "3350000" (dots before 3+ trailing digits are thousands separators)
/// - "1234.50" -> "1234.50" (single dot with <= 2 trailing digits is a decimal point)
/// - "1 234,75" -> "1234.75" (spaces in the integer part are thousands separators)
/// - "42" -> "42"
///
/// The result is not validated; coercion to a number happens later.
pub fn normalize_number(value: &str) -> String {
    let value = value.trim();

    if let Some((int_part, fraction)) = value.rsplit_once(',') {
        return format!("{}.{}", strip_separators(int_part), fraction);
    }

    if let Some((int_part, fraction)) = value.rsplit_once('.') {
        if fraction.chars().count() <= 2 {
            return format!("{}.{}", strip_separators(int_part), fraction);
        }
        return strip_separators(value);
    }

    value.to_string()
}

/// Parse a normalized quantity into a finite float, or `None`.
pub fn coerce_f64(value: &str) -> Option<f64> {
    normalize_number(value)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse the leading number of a money field such as "12.345,67 EUR".
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let value = value.trim();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ',' || c == ' '))
        .unwrap_or(value.len());
    let numeric = value[..end].trim();
    if numeric.is_empty() {
        return None;
    }
    Decimal::from_str(&normalize_number(numeric)).ok()
}

fn strip_separators(s: &str) -> String {
    s.chars().filter(|&c| c != '.' && c != ' ').collect()
}
