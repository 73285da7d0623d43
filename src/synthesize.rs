//! URL path synthesis: turns a bare path into a minimal OpenAPI document.
//!
//! The synthesized document is an ordinary specification tree, so every
//! registered rule evaluates it exactly as it would an authored one.

use crate::primitives::{last_segment_is_parameter, path_parameter_name};
use crate::types::PathAnalysis;
use serde_json::{Map, Value, json};

/// Names of every `{param}` segment, left to right.
pub fn extract_path_parameters(path: &str) -> Vec<String> {
    path.split('/')
        .filter_map(path_parameter_name)
        .map(str::to_string)
        .collect()
}

/// HTTP methods appropriate for a collection or an individual resource.
pub fn appropriate_methods(ends_with_resource: bool) -> Vec<String> {
    let methods: &[&str] = if ends_with_resource {
        &["get", "put", "patch", "delete"]
    } else {
        &["get", "post"]
    };
    methods.iter().map(|m| m.to_string()).collect()
}

/// Infers parameters, shape and methods for a bare path.
pub fn analyze_path(path: &str) -> PathAnalysis {
    let ends_with_resource = last_segment_is_parameter(path);
    PathAnalysis {
        path: path.to_string(),
        path_parameters: extract_path_parameters(path),
        ends_with_resource,
        appropriate_methods: appropriate_methods(ends_with_resource),
    }
}

/// Builds a single-path OpenAPI 3 document with one operation per
/// appropriate method.
///
/// Non-POST operations advertise one required string path parameter per
/// extracted name; POST operations carry none.
pub fn synthesize_spec(analysis: &PathAnalysis) -> Value {
    let parameters: Vec<Value> = analysis
        .path_parameters
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "in": "path",
                "required": true,
                "schema": { "type": "string" },
            })
        })
        .collect();

    let mut item = Map::new();
    for method in &analysis.appropriate_methods {
        let upper = method.to_uppercase();
        let mut operation = Map::new();
        operation.insert("summary".into(), json!(format!("{} endpoint", upper)));
        operation.insert(
            "description".into(),
            json!(format!("Auto-generated {} endpoint for validation", upper)),
        );
        if !parameters.is_empty() && method != "post" {
            operation.insert("parameters".into(), Value::Array(parameters.clone()));
        }
        operation.insert(
            "responses".into(),
            json!({ "200": { "description": "OK" } }),
        );
        item.insert(method.clone(), Value::Object(operation));
    }

    let mut paths = Map::new();
    paths.insert(analysis.path.clone(), Value::Object(item));

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Auto-generated API for URL Path Validation",
            "version": "1.0.0",
        },
        "paths": Value::Object(paths),
    })
}
