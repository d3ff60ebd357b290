//! Request parameter validation
//!
//! Every validator is total: malformed input falls back to the configured
//! default instead of producing an error.

use std::collections::BTreeMap;

use serde_json::Value;

use super::defaults::PerPageLimit;

/// Parse the leading integer of a value.
///
/// Strings are read like `"  12abc"` → `12`, `"-3"` → `-3`, `"1.9"` → `1`.
/// Numbers are truncated toward zero. Everything else is not a number.
pub fn parse_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in digits[..end].bytes() {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }
    Some(if negative { -value } else { value })
}

/// String form of a scalar parameter. `null`, `false` and non-scalars
/// read as empty.
pub fn stringify(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

pub fn validate_page(raw: Option<&Value>, default: u64) -> u64 {
    match raw.and_then(parse_int) {
        Some(page) if page >= 1 => page as u64,
        _ => default,
    }
}

pub fn validate_per_page(raw: Option<&Value>, default: u64, limit: PerPageLimit) -> u64 {
    let requested = raw
        .and_then(parse_int)
        .unwrap_or_else(|| i64::try_from(default).unwrap_or(i64::MAX));
    limit.clamp(requested)
}

/// Trimmed search text with the LIKE wildcards `%` and `_` blanked out.
pub fn validate_search(raw: Option<&Value>, default: &str) -> String {
    let submitted = raw.map(stringify).unwrap_or_default();
    let submitted = submitted.trim();
    let search = if submitted.is_empty() {
        default
    } else {
        submitted
    };
    search.replace(['%', '_'], " ")
}

/// Submitted filter values, or the defaults when `raw` is not an object.
pub fn validate_filters(
    raw: Option<&Value>,
    default: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    match raw {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, value)| (name.clone(), stringify(value).trim().to_string()))
            .collect(),
        _ => default
            .iter()
            .map(|(name, value)| (name.clone(), value.trim().to_string()))
            .collect(),
    }
}

pub fn validate_sorts(raw: Option<&Value>, default: &str) -> String {
    let submitted = raw.map(stringify).unwrap_or_default();
    let submitted = submitted.trim();
    if submitted.is_empty() {
        default.to_string()
    } else {
        submitted.to_string()
    }
}
