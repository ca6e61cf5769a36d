//! Parse-or-zero rule for numeric form fields
//!
//! Form inputs are free text. A value contributes its leading decimal
//! number, or nothing at all: `"12abc"` is 12, `"abc"` is 0, `""` is 0.
//! Results that are not finite are also 0 so downstream arithmetic stays
//! finite.

/// Parse the longest leading decimal number of `raw`, or return `0.0`.
///
/// Accepted shape after trimming whitespace:
/// `[+-]digits[.digits][(e|E)[+-]digits]`, where either the integer or the
/// fractional digits may be empty but not both.
///
/// # Examples
///
/// ```
/// use carbonwise_domain::utils::parse_or_zero;
///
/// assert_eq!(parse_or_zero("1500"), 1500.0);
/// assert_eq!(parse_or_zero(" 12.5 kWh"), 12.5);
/// assert_eq!(parse_or_zero("-.5"), -0.5);
/// assert_eq!(parse_or_zero("2e3"), 2000.0);
/// assert_eq!(parse_or_zero("n/a"), 0.0);
/// assert_eq!(parse_or_zero(""), 0.0);
/// ```
#[must_use]
pub fn parse_or_zero(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let prefix = numeric_prefix(trimmed);
    if prefix.is_empty() {
        return 0.0;
    }
    prefix.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Interpret a form value as a checkbox state.
///
/// `true`, `on`, `yes` and `1` (case-insensitive) are truthy; everything
/// else, including the empty string, is false.
#[must_use]
pub fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "on" | "yes" | "1")
}

/// Replace non-finite values with zero.
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        // A bare "." only belongs to the number if digits surround it.
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}
