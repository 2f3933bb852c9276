use std::str::FromStr;

pub const DEFAULT_PARALLAX_FACTOR: f64 = 0.5;
pub const DEFAULT_TYPEWRITER_SPEED_MS: u32 = 50;

/// How much of an attribute's leading number is read before the rest is
/// ignored, mirroring the browser's `parseFloat` / `parseInt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberScan {
    /// Whole value must parse.
    Strict,
    /// Sign, digits, fraction and exponent: `"0.3px"` reads as `0.3`.
    Float,
    /// Sign and digits only: `"12.5"` reads as `12`.
    Integer,
}

pub fn parse_with_default<T, F>(raw: Option<&str>, default: T, accept: F) -> T
where
    T: FromStr,
    F: Fn(&T) -> bool,
{
    parse_scanned_with_default(raw, NumberScan::Strict, default, accept)
}

pub fn parse_scanned_with_default<T, F>(raw: Option<&str>, scan: NumberScan, default: T, accept: F) -> T
where
    T: FromStr,
    F: Fn(&T) -> bool,
{
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| leading_number(value, scan))
        .and_then(|value| value.parse::<T>().ok())
        .filter(|value| accept(value))
        .unwrap_or(default)
}

pub fn parse_with_bounds<T>(raw: Option<&str>, default: T, bounds: (T, T)) -> T
where
    T: FromStr + PartialOrd,
{
    parse_with_default(raw, default, |value| *value >= bounds.0 && *value <= bounds.1)
}

fn digits_from(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    end
}

/// Longest numeric prefix of `value` for the given scan, or `None` when it
/// does not start with a digit (after an optional sign).
fn leading_number(value: &str, scan: NumberScan) -> Option<&str> {
    if scan == NumberScan::Strict {
        return Some(value);
    }

    let bytes = value.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = digits_from(bytes, sign);
    let mut has_digits = end > sign;

    if scan == NumberScan::Float {
        if bytes.get(end) == Some(&b'.') {
            let fraction_end = digits_from(bytes, end + 1);
            if has_digits || fraction_end > end + 1 {
                end = fraction_end;
                has_digits = true;
            }
        }

        if has_digits && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let exponent_sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
            let exponent_start = end + 1 + exponent_sign;
            let exponent_end = digits_from(bytes, exponent_start);
            if exponent_end > exponent_start {
                end = exponent_end;
            }
        }
    }

    has_digits.then(|| &value[..end])
}

/// A zero factor is treated like a missing one.
pub fn parallax_factor(raw: Option<&str>) -> f64 {
    parse_scanned_with_default(raw, NumberScan::Float, DEFAULT_PARALLAX_FACTOR, |value: &f64| {
        value.is_finite() && *value != 0.0
    })
}

pub fn typewriter_speed_ms(raw: Option<&str>) -> u32 {
    parse_scanned_with_default(raw, NumberScan::Integer, DEFAULT_TYPEWRITER_SPEED_MS, |value: &u32| {
        *value > 0
    })
}

/// Text attributes fall back when empty, not only when absent.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallax_factor_reads_explicit_values() {
        assert_eq!(parallax_factor(Some("2")), 2.0);
        assert_eq!(parallax_factor(Some(" 0.25 ")), 0.25);
        assert_eq!(parallax_factor(Some("-1.5")), -1.5);
    }

    #[test]
    fn parallax_factor_falls_back_for_missing_or_garbage() {
        assert_eq!(parallax_factor(None), DEFAULT_PARALLAX_FACTOR);
        assert_eq!(parallax_factor(Some("")), DEFAULT_PARALLAX_FACTOR);
        assert_eq!(parallax_factor(Some("fast")), DEFAULT_PARALLAX_FACTOR);
        assert_eq!(parallax_factor(Some("NaN")), DEFAULT_PARALLAX_FACTOR);
        assert_eq!(parallax_factor(Some("inf")), DEFAULT_PARALLAX_FACTOR);
    }

    #[test]
    fn parallax_factor_of_zero_uses_default() {
        assert_eq!(parallax_factor(Some("0")), DEFAULT_PARALLAX_FACTOR);
        assert_eq!(parallax_factor(Some("0.0")), DEFAULT_PARALLAX_FACTOR);
    }

    #[test]
    fn typewriter_speed_requires_positive_integer() {
        assert_eq!(typewriter_speed_ms(Some("120")), 120);
        assert_eq!(typewriter_speed_ms(Some("0")), DEFAULT_TYPEWRITER_SPEED_MS);
        assert_eq!(typewriter_speed_ms(Some("-5")), DEFAULT_TYPEWRITER_SPEED_MS);
        assert_eq!(typewriter_speed_ms(None), DEFAULT_TYPEWRITER_SPEED_MS);
    }

    #[test]
    fn numeric_attributes_read_leading_number_and_ignore_suffix() {
        assert_eq!(parallax_factor(Some("0.3px")), 0.3);
        assert_eq!(parallax_factor(Some(".5x")), 0.5);
        assert_eq!(parallax_factor(Some("-2e1 fast")), -20.0);
        assert_eq!(parallax_factor(Some("1e")), 1.0);
        assert_eq!(typewriter_speed_ms(Some("80ms")), 80);
        assert_eq!(typewriter_speed_ms(Some("12.5")), 12);
        assert_eq!(typewriter_speed_ms(Some("+40")), 40);
    }

    #[test]
    fn leading_number_needs_a_digit_up_front() {
        assert_eq!(leading_number("px10", NumberScan::Float), None);
        assert_eq!(leading_number("-.", NumberScan::Float), None);
        assert_eq!(leading_number(".5", NumberScan::Integer), None);
        assert_eq!(leading_number("7.25e-1rem", NumberScan::Float), Some("7.25e-1"));
        assert_eq!(leading_number("7.25", NumberScan::Integer), Some("7"));
    }

    #[test]
    fn strict_scan_keeps_whole_value() {
        assert_eq!(parse_with_default(Some("80ms"), 5u32, |_| true), 5);
        assert_eq!(parse_with_default(Some("80"), 5u32, |_| true), 80);
    }

    #[test]
    fn bounds_reject_out_of_range_values() {
        assert_eq!(parse_with_bounds(Some("700"), 600u32, (1, 10_000)), 700);
        assert_eq!(parse_with_bounds(Some("0"), 600u32, (1, 10_000)), 600);
        assert_eq!(parse_with_bounds(Some("10001"), 600u32, (1, 10_000)), 600);
        assert_eq!(parse_with_bounds(Some("10000"), 600u32, (1, 10_000)), 10_000);
    }

    #[test]
    fn non_empty_drops_blank_text() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("hi".to_string())), Some("hi".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
