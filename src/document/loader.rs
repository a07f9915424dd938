//! JSON to Value loader
//!
//! Plain JSON maps onto the matching `Value` variants. Single-key objects
//! whose key starts with `$` carry types JSON has no literal for:
//!
//! | marker      | value                                         |
//! |-------------|-----------------------------------------------|
//! | `$record`   | record document (see [`RecordDocument`])      |
//! | `$symbol`   | symbol name                                   |
//! | `$datetime` | `YYYY-MM-DD HH:MM:SS` or RFC 3339             |
//! | `$date`     | `YYYY-MM-DD`                                  |
//! | `$uuid`     | hyphenated UUID                               |
//!
//! Any other object is a plain mapping.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use super::error::{DocumentError, DocumentResult};
use crate::core::value::{DATE_FORMAT, DATETIME_FORMAT};
use crate::core::{Entity, Value};

/// Body of a `$record` marker.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordDocument {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub attributes: Map<String, JsonValue>,
    /// Declared associations.
    #[serde(default)]
    pub relations: Map<String, JsonValue>,
    /// Accessors that are not associations.
    #[serde(default)]
    pub accessors: Map<String, JsonValue>,
    #[serde(default)]
    pub valid_api_includes: Option<Vec<String>>,
}

fn default_model() -> String {
    "record".to_string()
}

/// Build a value graph from a parsed JSON document.
pub fn load_value(json: &JsonValue) -> DocumentResult<Value> {
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Boolean(*b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Integer(i)),
            None => n.as_f64().map(Value::Float).ok_or_else(|| {
                DocumentError::InvalidStructure(format!("Unrepresentable number {}", n))
            }),
        },
        JsonValue::String(s) => Ok(Value::Text(s.clone())),
        JsonValue::Array(items) => items
            .iter()
            .map(load_value)
            .collect::<DocumentResult<Vec<_>>>()
            .map(Value::Sequence),
        JsonValue::Object(obj) => load_object(obj),
    }
}

fn load_object(obj: &Map<String, JsonValue>) -> DocumentResult<Value> {
    if obj.len() == 1 {
        if let Some((key, body)) = obj.iter().next() {
            match key.as_str() {
                "$record" => return load_record(body),
                "$symbol" => return expect_str(key, body).map(Value::symbol),
                "$datetime" => return parse_datetime(expect_str(key, body)?).map(Value::DateTime),
                "$date" => {
                    let s = expect_str(key, body)?;
                    return NaiveDate::parse_from_str(s, DATE_FORMAT)
                        .map(Value::Date)
                        .map_err(|e| invalid_scalar(key, s, e));
                }
                "$uuid" => {
                    let s = expect_str(key, body)?;
                    return Uuid::parse_str(s)
                        .map(Value::Uuid)
                        .map_err(|e| invalid_scalar(key, s, e));
                }
                _ => {}
            }
        }
    }

    let mut map = indexmap::IndexMap::with_capacity(obj.len());
    for (key, value) in obj {
        map.insert(key.clone(), load_value(value)?);
    }
    Ok(Value::Mapping(map))
}

fn load_record(body: &JsonValue) -> DocumentResult<Value> {
    let doc = RecordDocument::deserialize(body)
        .map_err(|e| DocumentError::InvalidStructure(format!("Bad $record body: {}", e)))?;

    let mut entity = Entity::new(doc.model);
    for (name, value) in &doc.attributes {
        entity = entity.attribute(name.clone(), load_value(value)?);
    }
    for (name, value) in &doc.relations {
        let related = load_value(value)?;
        entity = entity.with_relation(name.clone(), move || related.clone());
    }
    for (name, value) in &doc.accessors {
        let related = load_value(value)?;
        entity = entity.with_accessor(name.clone(), move || related.clone());
    }
    if let Some(allowed) = doc.valid_api_includes {
        entity = entity.with_valid_api_includes(allowed);
    }
    Ok(Value::record(entity))
}

fn parse_datetime(s: &str) -> DocumentResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.naive_utc()))
        .map_err(|e| invalid_scalar("$datetime", s, e))
}

fn expect_str<'a>(marker: &str, body: &'a JsonValue) -> DocumentResult<&'a str> {
    body.as_str().ok_or_else(|| {
        DocumentError::InvalidStructure(format!("{} expects a string, got {}", marker, body))
    })
}

fn invalid_scalar(marker: &str, raw: &str, err: impl std::fmt::Display) -> DocumentError {
    DocumentError::InvalidStructure(format!("Invalid {} '{}': {}", marker, raw, err))
}
