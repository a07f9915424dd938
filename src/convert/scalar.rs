//! Leaf conversions. Includes never reach this module.

use serde_json::Value as JsonValue;

use crate::core::Value;
use crate::core::value::{DATE_FORMAT, DATETIME_FORMAT};

/// API form of a scalar, or `None` when `value` is not a scalar.
pub(super) fn scalar_to_api(value: &Value) -> Option<JsonValue> {
    let json = match value {
        Value::Null => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Integer(i) => JsonValue::from(*i),
        // Non-finite floats have no JSON number form and become null.
        Value::Float(f) => JsonValue::from(*f),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Symbol(sym) => JsonValue::String(sym.name().to_string()),
        Value::DateTime(dt) => JsonValue::String(dt.format(DATETIME_FORMAT).to_string()),
        Value::Date(d) => JsonValue::String(d.format(DATE_FORMAT).to_string()),
        Value::Uuid(u) => JsonValue::String(u.hyphenated().to_string()),
        Value::Json(j) => j.clone(),
        Value::Sequence(_) | Value::Mapping(_) | Value::Record(_) | Value::Opaque(_) => {
            return None;
        }
    };
    Some(json)
}
