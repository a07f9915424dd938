//! Record conversion and include routing.

use serde_json::Value as JsonValue;
use tracing::{debug, trace};

use super::{ApiConverter, container};
use crate::core::{ApiError, Record, Result};
use crate::includes::{Include, Includes};

pub(super) fn convert_record<R: Record + ?Sized>(
    converter: &ApiConverter,
    record: &R,
    includes: &[Include],
    depth: usize,
) -> Result<JsonValue> {
    let limit = converter.config().max_depth;
    if depth > limit {
        return Err(ApiError::DepthExceeded(limit));
    }

    // Attributes never see the caller's includes.
    let mut result = container::convert_entries(converter, &record.attributes(), &[], depth + 1)?;

    let requested = Includes::normalize(includes);
    if requested.is_empty() {
        return Ok(JsonValue::Object(result));
    }

    let expandable = record.expandable_relations();
    for (name, sub) in requested.iter() {
        if !expandable.contains(name) {
            debug!(model = record.model_name(), include = name, "ignoring include: not an expandable relation");
            continue;
        }
        let Some(related) = record.relation(name) else {
            debug!(model = record.model_name(), include = name, "ignoring include: record has no accessor");
            continue;
        };

        trace!(model = record.model_name(), relation = name, sub_includes = sub.len(), depth, "expanding relation");
        let converted = converter.convert_at(&related, sub, depth + 1)?;
        result.insert(name.to_string(), converted);
    }

    Ok(JsonValue::Object(result))
}
