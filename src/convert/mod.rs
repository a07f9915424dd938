//! Value to API conversion
//!
//! Every [`Value`] variant has exactly one conversion:
//!
//! - `scalar.rs` - leaves; includes are accepted and dropped
//! - `container.rs` - sequences and mappings; includes go verbatim to every element
//! - `record.rs` - attributes plus the relations the includes ask for
//! - `config.rs` - limits applied while descending
//!
//! Conversion is all-or-nothing: the first value without an API form aborts
//! the call with [`ApiError::UnsupportedValue`].

mod config;
mod container;
mod record;
mod scalar;

use serde_json::Value as JsonValue;

use crate::core::{ApiError, Record, Result, Value};
use crate::includes::Include;

pub use config::ConverterConfig;

/// Converts values into plain API trees.
#[derive(Debug, Clone, Default)]
pub struct ApiConverter {
    config: ConverterConfig,
}

impl ApiConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert `value`, expanding the relations named by `includes`.
    pub fn convert(&self, value: &Value, includes: &[Include]) -> Result<JsonValue> {
        self.convert_at(value, includes, 0)
    }

    /// Convert a record that is not wrapped in a [`Value`].
    pub fn convert_record<R: Record + ?Sized>(
        &self,
        record: &R,
        includes: &[Include],
    ) -> Result<JsonValue> {
        record::convert_record(self, record, includes, 0)
    }

    pub(crate) fn convert_at(
        &self,
        value: &Value,
        includes: &[Include],
        depth: usize,
    ) -> Result<JsonValue> {
        match value {
            Value::Sequence(items) => container::convert_sequence(self, items, includes, depth),
            Value::Mapping(map) => container::convert_mapping(self, map, includes, depth),
            Value::Record(r) => record::convert_record(self, r.as_ref(), includes, depth),
            other => scalar::scalar_to_api(other)
                .ok_or_else(|| ApiError::UnsupportedValue(other.describe())),
        }
    }
}

/// Anything that can render itself for the API.
pub trait ToApi {
    fn to_api(&self, includes: &[Include]) -> Result<JsonValue>;
}

impl ToApi for Value {
    fn to_api(&self, includes: &[Include]) -> Result<JsonValue> {
        ApiConverter::new().convert(self, includes)
    }
}

impl<R: Record + ?Sized> ToApi for R {
    fn to_api(&self, includes: &[Include]) -> Result<JsonValue> {
        ApiConverter::new().convert_record(self, includes)
    }
}

/// Convert `value` with the default configuration.
///
/// # Examples
///
/// ```
/// use to_api::{Include, Value, to_api};
///
/// let v = Value::Sequence(vec![Value::symbol("draft"), Value::Integer(3)]);
/// let api = to_api(&v, &[Include::from("ignored")]).unwrap();
/// assert_eq!(api, serde_json::json!(["draft", 3]));
/// ```
pub fn to_api(value: &Value, includes: &[Include]) -> Result<JsonValue> {
    ApiConverter::new().convert(value, includes)
}
