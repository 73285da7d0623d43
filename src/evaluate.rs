//! Condition interpreter.
//!
//! Each [`Condition`] is a narrow predicate over the specification tree that
//! yields zero or more [`Issue`]s. Conditions arrive here already validated
//! and compiled (see [`crate::declarative`]), so evaluation cannot fail.

use crate::enums::ConditionType;
use crate::primitives::{path_segments, schema_definitions};
use crate::types::Issue;
use regex::Regex;
use serde_json::{Map, Value};

/// Message used when a spec carries no schema definitions at all.
pub const NO_SCHEMAS_MESSAGE: &str = "No schema definitions found in API spec";

/// A compiled declarative condition.
#[derive(Clone, Debug)]
pub enum Condition {
    /// Every path template must match `pattern`.
    PathPattern { pattern: Regex, message: String },
    /// `path`, when present, must define an operation for `method`.
    MethodCheck {
        path: String,
        method: String,
        message: String,
    },
    /// `path`, when present, must declare `parameters`.
    ParameterCheck { path: String, message: String },
    /// Every non-empty segment of every path must match `pattern`.
    ResourceNaming { pattern: Regex, message: String },
    /// Some schema must declare property `field`, optionally with `format`.
    SchemaField {
        field: String,
        format: Option<String>,
        message: String,
    },
}

impl Condition {
    pub fn condition_type(&self) -> ConditionType {
        match self {
            Condition::PathPattern { .. } => ConditionType::PathPattern,
            Condition::MethodCheck { .. } => ConditionType::MethodCheck,
            Condition::ParameterCheck { .. } => ConditionType::ParameterCheck,
            Condition::ResourceNaming { .. } => ConditionType::ResourceNaming,
            Condition::SchemaField { .. } => ConditionType::SchemaField,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Condition::PathPattern { message, .. }
            | Condition::MethodCheck { message, .. }
            | Condition::ParameterCheck { message, .. }
            | Condition::ResourceNaming { message, .. }
            | Condition::SchemaField { message, .. } => message,
        }
    }
}

/// Evaluates one condition against a specification.
///
/// `paths` is the spec's `paths` mapping; callers have already established
/// that it exists.
pub fn evaluate_condition(
    condition: &Condition,
    spec: &Value,
    paths: &Map<String, Value>,
) -> Vec<Issue> {
    match condition {
        Condition::PathPattern { pattern, message } => check_path_pattern(pattern, message, paths),
        Condition::MethodCheck {
            path,
            method,
            message,
        } => check_method(path, method, message, paths),
        Condition::ParameterCheck { path, message } => check_parameters(path, message, paths),
        Condition::ResourceNaming { pattern, message } => {
            check_resource_naming(pattern, message, paths)
        }
        Condition::SchemaField {
            field,
            format,
            message,
        } => check_schema_field(field, format.as_deref(), message, spec),
    }
}

// ─── path_pattern ───────────────────────────────────────────────────────────

fn check_path_pattern(pattern: &Regex, message: &str, paths: &Map<String, Value>) -> Vec<Issue> {
    paths
        .keys()
        .filter(|path| !pattern.is_match(path))
        .map(|path| Issue::at_path(path.as_str(), message))
        .collect()
}

// ─── method_check ───────────────────────────────────────────────────────────

fn check_method(
    path: &str,
    method: &str,
    message: &str,
    paths: &Map<String, Value>,
) -> Vec<Issue> {
    // An absent path is not this condition's concern.
    let Some(item) = paths.get(path).and_then(Value::as_object) else {
        return Vec::new();
    };
    if item.keys().any(|k| k.eq_ignore_ascii_case(method)) {
        Vec::new()
    } else {
        vec![Issue::at_path(path, message)]
    }
}

// ─── parameter_check ────────────────────────────────────────────────────────

fn check_parameters(path: &str, message: &str, paths: &Map<String, Value>) -> Vec<Issue> {
    let Some(item) = paths.get(path).and_then(Value::as_object) else {
        return Vec::new();
    };
    if item.contains_key("parameters") {
        Vec::new()
    } else {
        vec![Issue::at_path(path, message)]
    }
}

// ─── resource_naming ────────────────────────────────────────────────────────

fn check_resource_naming(
    pattern: &Regex,
    message: &str,
    paths: &Map<String, Value>,
) -> Vec<Issue> {
    paths
        .keys()
        .filter_map(|path| {
            // First violating segment only.
            path_segments(path)
                .find(|segment| !pattern.is_match(segment))
                .map(|segment| Issue::at_path(path.as_str(), message).with_segment(segment))
        })
        .collect()
}

// ─── schema_field ───────────────────────────────────────────────────────────

fn check_schema_field(field: &str, format: Option<&str>, message: &str, spec: &Value) -> Vec<Issue> {
    let Some(schemas) = schema_definitions(spec) else {
        return vec![Issue::for_field(field, NO_SCHEMAS_MESSAGE)];
    };

    for (schema_name, schema) in schemas {
        let Some(property) = schema
            .get("properties")
            .and_then(Value::as_object)
            .and_then(|props| props.get(field))
        else {
            continue;
        };

        let Some(required_format) = format else {
            return Vec::new();
        };

        // A property without an object body cannot carry a format; keep looking.
        let Some(property) = property.as_object() else {
            continue;
        };

        let actual = property.get("format").and_then(Value::as_str);
        if actual == Some(required_format) {
            return Vec::new();
        }
        return vec![
            Issue::for_field(
                field,
                format!("{} (format should be {})", message, required_format),
            )
            .with_schema(schema_name.as_str()),
        ];
    }

    vec![Issue::for_field(field, message)]
}
