//! Specification tree → YAML rendering.

use crate::error::SerializeError;
use serde::Serialize;

/// Serialize a specification tree (or any serializable value) to YAML.
///
/// Mapping keys keep their insertion order, so a synthesized spec renders
/// with `openapi` first and operations in method order.
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, SerializeError> {
    serde_saphyr::to_string(value).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })
}
