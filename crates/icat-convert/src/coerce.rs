//! Value coercion helpers shared by both conversion directions.
//!
//! All helpers are best-effort: unrecognized input resolves to `None` or a
//! documented default, never to an error.

use serde_json::{Number, Value};

/// Tri-state boolean parse over the textual accept-sets.
///
/// `{"1","true","yes","y","on"}` parse true, `{"0","false","no","n","off"}`
/// parse false (case-insensitive, whitespace-trimmed); anything else,
/// including blank input, is unrecognized.
pub fn parse_bool(text: &str) -> Option<bool> {
    let lowered = text.trim().to_lowercase();
    match lowered.as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Permissive boolean coercion: unrecognized and blank input resolve false.
pub fn coerce_bool(text: &str) -> bool {
    parse_bool(text).unwrap_or(false)
}

/// Best-effort numeric coercion.
///
/// Blank or literal `"null"` is absent. Input without a decimal point or
/// exponent marker parses as an integer, otherwise as floating point;
/// parse failure or a non-finite result is absent.
pub fn coerce_num(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return None;
    }
    if trimmed.contains('.') || trimmed.contains(['e', 'E']) {
        let parsed: f64 = trimmed.parse().ok()?;
        Number::from_f64(parsed)
    } else {
        trimmed.parse::<i64>().ok().map(Number::from)
    }
}

/// Boolean coercion over an optional JSON scalar.
///
/// An absent value resolves to `default`; a JSON bool is taken verbatim; any
/// other value coerces through the textual form of its cell rendering.
pub fn coerce_bool_value(value: Option<&Value>, default: bool) -> bool {
    match value {
        None => default,
        Some(Value::Bool(flag)) => *flag,
        Some(other) => coerce_bool(&cell_text(other)),
    }
}

/// Renders a JSON value as a CSV cell.
///
/// Strings pass through, numbers and bools use their canonical display form,
/// and null/containers degrade to the empty string.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Renders an optional JSON value as a CSV cell, absent values as empty.
pub fn opt_cell_text(value: Option<&Value>) -> String {
    value.map(cell_text).unwrap_or_default()
}
