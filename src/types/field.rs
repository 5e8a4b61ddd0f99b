//! Lenient field parsing for delimited input.
//!
//! Every parser here is total: malformed or missing input collapses to a
//! neutral value instead of an error, so records are always well-shaped.

/// Parse a real number, substituting `0.0` for empty, malformed or
/// non-finite input.
pub fn parse_real(field: Option<&str>) -> f64 {
    field
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse an integer, substituting `0` for empty or malformed input.
///
/// Decimal input is truncated toward zero (`"1.0"` and `"1.7"` both read as 1).
pub fn parse_integer(field: Option<&str>) -> i64 {
    let Some(s) = field.map(str::trim) else {
        return 0;
    };

    if let Ok(v) = s.parse::<i64>() {
        return v;
    }

    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
        .unwrap_or(0)
}

/// Parse a count, substituting `0` for malformed or negative input.
pub fn parse_count(field: Option<&str>) -> u64 {
    u64::try_from(parse_integer(field)).unwrap_or(0)
}

/// Trimmed text, or `None` when the field is missing or blank.
pub fn non_empty(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}
