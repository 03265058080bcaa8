// SPDX-License-Identifier: PMPL-1.0-or-later
//! Comparator value helpers.
//!
//! Comparators are plain JSON values. These helpers decide how a value reads
//! when rendered into SQL text and when compared by its serialised form.

use serde_json::{Number, Value};

/// Integral value of a JSON number, if it has no fractional part.
///
/// `5` and `5.0` both yield `Some(5)` so they render and compare alike.
pub fn integral_number(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    // Beyond 2^53 floats lose integer precision.
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0 {
        Some(f as i64)
    } else {
        None
    }
}

/// Render a number the way it appears in filter text.
pub fn number_text(n: &Number) -> String {
    match integral_number(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}

/// Flatten a comparator into its list of values.
///
/// Absent and `null` comparators contribute nothing; arrays contribute their
/// items; anything else is a single value.
pub fn comparator_values(comparator: Option<&Value>) -> Vec<&Value> {
    match comparator {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Human-readable label for one comparator value.
pub fn option_label(value: &Value) -> String {
    match value {
        Value::Null => "<NULL>".to_string(),
        Value::String(s) if s.is_empty() => "<empty string>".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items.iter().map(option_label).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Whether a value coerces to a number, which decides if it is quoted.
///
/// `null`, booleans and blank strings coerce to zero; single-element arrays
/// coerce through their element.
pub fn looks_numeric(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
        Value::String(s) => numeric_text(s),
        Value::Array(items) => match items.as_slice() {
            [] => true,
            [only] => looks_numeric(only),
            _ => false,
        },
        Value::Object(_) => false,
    }
}

fn numeric_text(s: &str) -> bool {
    let t = s.trim();
    if t.is_empty() {
        return true;
    }
    if matches!(t, "Infinity" | "+Infinity" | "-Infinity") {
        return true;
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = t.strip_prefix(prefix) {
            return !digits.is_empty() && u128::from_str_radix(digits, radix).is_ok();
        }
    }
    // f64 parsing accepts "inf" and "nan", which are not numbers here.
    if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return false;
    }
    t.parse::<f64>().is_ok()
}
