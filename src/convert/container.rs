//! Sequences and mappings. Includes are handed to every element unchanged.

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use super::ApiConverter;
use crate::core::{Result, Value};
use crate::includes::Include;

pub(super) fn convert_sequence(
    converter: &ApiConverter,
    items: &[Value],
    includes: &[Include],
    depth: usize,
) -> Result<JsonValue> {
    items
        .iter()
        .map(|item| converter.convert_at(item, includes, depth))
        .collect::<Result<Vec<_>>>()
        .map(JsonValue::Array)
}

pub(super) fn convert_mapping(
    converter: &ApiConverter,
    map: &IndexMap<String, Value>,
    includes: &[Include],
    depth: usize,
) -> Result<JsonValue> {
    convert_entries(converter, map, includes, depth).map(JsonValue::Object)
}

pub(super) fn convert_entries(
    converter: &ApiConverter,
    map: &IndexMap<String, Value>,
    includes: &[Include],
    depth: usize,
) -> Result<Map<String, JsonValue>> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        out.insert(key.clone(), converter.convert_at(value, includes, depth)?);
    }
    Ok(out)
}
