use serde_json::Value;

use crate::shape::BIT_WIDTH;

/// Numeric view of a scalar. Numbers and numeric strings decode; anything else is `NaN`.
pub(crate) fn to_f64(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s).unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Parse a binary literal: `0b`-prefixed, or at least four bare `0`/`1` digits.
///
/// Shorter bare strings such as `"10"` are left to the numeric reading.
pub(crate) fn parse_bits(s: &str) -> Option<u32> {
    let s = s.trim();
    let digits = match s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        Some(rest) => rest,
        None if s.len() >= 4 => s,
        None => return None,
    };
    if digits.is_empty() || digits.len() > BIT_WIDTH {
        return None;
    }
    if !digits.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u32::from_str_radix(digits, 2).ok()
}

/// Row value of a bit-vector entry: a binary literal or a non-negative 32-bit integer.
pub(crate) fn to_bits(v: &Value) -> Option<u32> {
    match v {
        Value::String(s) => parse_bits(s),
        Value::Number(n) => n.as_u64().and_then(|u| u32::try_from(u).ok()),
        _ => None,
    }
}

/// Compact label for a number: integers without a fraction, others with at most two decimals.
pub(crate) fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return if v.is_nan() {
            String::new()
        } else if v > 0.0 {
            "∞".to_owned()
        } else {
            "-∞".to_owned()
        };
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Text shown for a scalar cell.
pub(crate) fn display(v: &Value) -> String {
    match v {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => v.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/scalar.rs"]
mod tests;
