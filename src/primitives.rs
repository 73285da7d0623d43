//! Shared helpers over the dynamic specification tree.
//!
//! Absent or wrong-shaped keys resolve to `None` rather than an error: most
//! checks treat structural absence as "nothing to check".

use serde_json::{Map, Value};

/// Keys of a path item that are not HTTP operations.
pub const NON_OPERATION_KEYS: [&str; 3] = ["parameters", "summary", "description"];

/// Returns the `paths` mapping of a specification, if it has one.
pub fn paths_of(spec: &Value) -> Option<&Map<String, Value>> {
    spec.as_object()?.get("paths")?.as_object()
}

/// Non-empty `/`-delimited segments of a path template.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// `true` for a brace-delimited segment such as `{id}`.
pub fn is_path_parameter(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
}

/// Name inside a brace-delimited segment, or `None` for a literal segment.
pub fn path_parameter_name(segment: &str) -> Option<&str> {
    if is_path_parameter(segment) {
        Some(&segment[1..segment.len() - 1])
    } else {
        None
    }
}

/// `true` if the final `/`-segment (possibly empty) is a path parameter.
///
/// A trailing slash leaves an empty final segment and therefore yields `false`.
pub fn last_segment_is_parameter(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(is_path_parameter)
}

/// Locates the schema definitions of a specification.
///
/// An OpenAPI 3 document (one with a `components` mapping) must carry
/// `components.schemas`; only a document without `components` falls back to
/// OpenAPI 2 top-level `definitions`.
pub fn schema_definitions(spec: &Value) -> Option<&Map<String, Value>> {
    let root = spec.as_object()?;
    match root.get("components").and_then(Value::as_object) {
        Some(components) => components.get("schemas")?.as_object(),
        None => root.get("definitions")?.as_object(),
    }
}
