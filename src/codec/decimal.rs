//! Decimal text formatting and value validation

use super::errors::FieldError;

/// Two-decimal text used inside fixed-width slots.
pub fn format_fixed(value: f64) -> String {
    format!("{:.2}", value)
}

/// Integer text when the value is integral, two-decimal text otherwise.
///
/// Document rows store `3` rather than `3.00` for whole quantities.
pub fn format_compact(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Returns true if `value` only contains ASCII letters and digits.
///
/// The empty code is valid.
pub fn is_valid_code(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Returns true if `value` parses as a finite decimal >= 0.
///
/// Leading whitespace is skipped; trailing whitespace makes the value invalid.
pub fn is_valid_positive_number(value: &str) -> bool {
    parse_lenient(value).map_or(false, |v| v >= 0.0)
}

/// Parses a non-negative decimal, reporting `field` on failure.
pub fn parse_non_negative(field: &'static str, value: &str) -> Result<f64, FieldError> {
    match parse_lenient(value) {
        Some(v) if v >= 0.0 => Ok(v),
        _ => Err(FieldError::NotPositiveNumber {
            field,
            value: value.to_string(),
        }),
    }
}

/// Parses a number written by [`format_compact`].
pub fn parse_compact(field: &'static str, value: &str) -> Result<f64, FieldError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldError::NotPositiveNumber {
            field,
            value: value.to_string(),
        })
}

// Leading whitespace is skipped and an empty string reads as zero.
fn parse_lenient(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
