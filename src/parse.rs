//! Specification loading: file-or-text resolution and YAML/JSON decoding.

use crate::error::{ParseError, ParseErrorKind};
use serde_json::Value;
use std::path::Path;

/// Resolve an API specification argument into a parsed tree.
///
/// If `spec` names an existing filesystem entry its contents are read and
/// parsed; otherwise `spec` itself is parsed as YAML or JSON text.
pub fn resolve_spec(spec: &str) -> Result<Value, ParseError> {
    let path = Path::new(spec);
    if !spec.is_empty() && path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| ParseError {
            kind: ParseErrorKind::Io,
            message: format!("error reading API spec file {}: {}", path.display(), e),
        })?;
        tracing::debug!(file = %path.display(), bytes = content.len(), "read API spec file");
        return parse_spec(&content);
    }
    parse_spec(spec)
}

/// Parse YAML or JSON text into a specification tree.
///
/// JSON is accepted as YAML flow syntax. For a multi-document stream the
/// first non-empty document is used. Text with no content yields
/// `Value::Null`, which rules report as an invalid spec rather than a parse
/// failure. Any other non-mapping root is rejected.
pub fn parse_spec(input: &str) -> Result<Value, ParseError> {
    if is_blank_document(input) {
        return Ok(Value::Null);
    }

    // Only the first document of a multi-document stream is validated.
    let documents: Vec<Value> = serde_saphyr::from_multiple(input).map_err(|e| {
        let msg = e.to_string();
        ParseError {
            kind: classify_saphyr_error(&msg),
            message: msg,
        }
    })?;
    let value = documents.into_iter().next().unwrap_or(Value::Null);

    match value {
        Value::Object(_) | Value::Null => Ok(value),
        other => Err(ParseError {
            kind: ParseErrorKind::TypeMismatch,
            message: format!(
                "API spec root must be a mapping, got {}",
                value_kind(&other)
            ),
        }),
    }
}

/// Empty, whitespace-only, or comment-only text.
fn is_blank_document(input: &str) -> bool {
    input.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---"
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

fn classify_saphyr_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("invalid type") || lower.contains("expected") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}
