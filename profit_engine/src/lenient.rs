//! Forgiving numeric coercion.
//!
//! Values reaching the estimator come from free-form form fields, so a
//! number may arrive as a JSON number, as a string, as `null` or not at
//! all.  The helpers here turn every one of those into an `f64` and
//! never fail: anything that does not parse, or parses to a non-finite
//! value, becomes `0.0`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a user-entered string into a finite number.
///
/// Leading and trailing whitespace is ignored.  Empty or unparseable
/// input yields `0.0`, as do `"NaN"` and `"inf"`.
pub fn parse_number(raw: &str) -> f64 {
    finite_or_zero(raw.trim().parse::<f64>().unwrap_or(0.0))
}

/// Coerce an arbitrary JSON value into a finite number.
pub fn coerce(value: &Value) -> f64 {
    match value {
        Value::Number(n) => finite_or_zero(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => parse_number(s),
        _ => 0.0,
    }
}

/// Convert a whole-number percentage (`60` meaning 60 %) to a fraction.
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Replace NaN and infinities with `0.0`.
pub(crate) fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Serde helper for `#[serde(deserialize_with = "lenient::number")]`.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce(&value))
}

/// Serde helper for integer counts.  Fractional values are truncated
/// toward zero; out-of-range values saturate.
pub fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match &value {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| coerce(&value) as i64),
        _ => coerce(&value) as i64,
    };
    Ok(count)
}

/// Serde helper for free-text labels.  Numbers keep their textual form;
/// `null` and structured values become an empty string.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}
