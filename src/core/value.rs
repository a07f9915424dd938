use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::core::Record;

/// Format used for every `DateTime` that leaves the crate.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used for every `Date` that leaves the crate.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Interned-style name. Serializes to its bare name, without any sigil.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything `to_api` can be asked to convert.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Symbol(Symbol),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Uuid(Uuid),
    /// Raw nested payload, passed through as-is.
    Json(JsonValue),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
    Record(Arc<dyn Record>),
    /// Foreign object with no API form (a compiled pattern, a handle, ...).
    /// Holds a human readable description used in error messages.
    Opaque(String),
}

impl Value {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(Symbol::new(name))
    }

    pub fn record<R: Record + 'static>(record: R) -> Self {
        Self::Record(Arc::new(record))
    }

    pub fn opaque(description: impl Into<String>) -> Self {
        Self::Opaque(description.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Boolean(_) => "BOOLEAN",
            Self::Integer(_) => "INTEGER",
            Self::Float(_) => "FLOAT",
            Self::Text(_) => "TEXT",
            Self::Symbol(_) => "SYMBOL",
            Self::DateTime(_) => "DATETIME",
            Self::Date(_) => "DATE",
            Self::Uuid(_) => "UUID",
            Self::Json(_) => "JSON",
            Self::Sequence(_) => "SEQUENCE",
            Self::Mapping(_) => "MAPPING",
            Self::Record(_) => "RECORD",
            Self::Opaque(_) => "OPAQUE",
        }
    }

    /// Short description used to identify a value in errors and logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Opaque(desc) => format!("{} <{}>", self.type_name(), desc),
            Self::Record(record) => format!("{} <{}>", self.type_name(), record.model_name()),
            Self::Sequence(items) => format!("{} of {} elements", self.type_name(), items.len()),
            Self::Mapping(map) => format!("{} of {} keys", self.type_name(), map.len()),
            other => format!("{} {}", other.type_name(), other),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Symbol(s) => Some(s.name()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Arc<dyn Record>> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Self::Sequence(_) | Self::Mapping(_) | Self::Record(_) | Self::Opaque(_)
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(fl) => write!(f, "{}", fl),
            Self::Text(s) => write!(f, "{}", s),
            Self::Symbol(s) => write!(f, "{}", s),
            Self::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Self::Uuid(u) => write!(f, "{}", u),
            Self::Json(j) => write!(f, "{}", j),
            Self::Sequence(items) => write!(f, "[{} elements]", items.len()),
            Self::Mapping(map) => write!(f, "{{{} keys}}", map.len()),
            Self::Record(record) => write!(f, "#<{}>", record.model_name()),
            Self::Opaque(desc) => write!(f, "#<{}>", desc),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Self::Symbol(s)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

// Zoned timestamps are rendered by their UTC wall clock.
impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::DateTime(dt.naive_utc())
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<JsonValue> for Value {
    fn from(j: JsonValue) -> Self {
        Self::Json(j)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
