//! Transport-independent request dispatch.
//!
//! Decodes a JSON-RPC 2.0-shaped envelope `{jsonrpc, id, method, params}`
//! and routes it to the validator. Framing (HTTP, stdio, ...) is left to the
//! caller; [`Dispatcher`] only maps one decoded request to one response.

use crate::error::RequestError;
use crate::validator::Validator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Mutex;
use std::time::Instant;

pub const JSONRPC_VERSION: &str = "2.0";

/// Error code for any failure while processing a decoded request.
pub const PROCESSING_ERROR_CODE: i64 = -32000;

/// Error code for an envelope that could not be decoded.
pub const PARSE_ERROR_CODE: i64 = -32700;

/// A decoded request envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub id: Value,
    pub method: String,
    pub params: Map<String, Value>,
}

impl Request {
    /// Decodes an envelope. A missing or non-object `params` is treated as
    /// empty; a missing or non-string `method` is an error.
    pub fn from_value(value: &Value) -> Result<Request, RequestError> {
        let obj = value
            .as_object()
            .ok_or_else(|| RequestError::InvalidEnvelope("request must be an object".into()))?;
        let method = obj
            .get("method")
            .and_then(Value::as_str)
            .ok_or_else(|| RequestError::InvalidEnvelope("missing or invalid method".into()))?;
        Ok(Request {
            id: obj.get("id").cloned().unwrap_or(Value::Null),
            method: method.to_string(),
            params: obj
                .get("params")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        })
    }
}

/// Error body of a failed response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

/// A response envelope. Exactly one of `result` and `error` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Response {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Response {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(ResponseError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Routes requests to a [`Validator`].
///
/// The validator is read-only; the only mutable state is the time of the
/// last `ping`, guarded by a mutex for keep-alive probing.
#[derive(Debug)]
pub struct Dispatcher {
    validator: Validator,
    last_ping: Mutex<Instant>,
}

impl Dispatcher {
    pub fn new(validator: Validator) -> Self {
        Dispatcher {
            validator,
            last_ping: Mutex::new(Instant::now()),
        }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// When the last `ping` arrived (construction time if none has).
    pub fn last_ping(&self) -> Instant {
        *self.last_ping.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Decodes one JSON envelope and handles it.
    pub fn handle_json(&self, input: &str) -> Response {
        let value: Value = match serde_json::from_str(input) {
            Ok(v) => v,
            Err(e) => {
                return Response::failure(
                    Value::Null,
                    PARSE_ERROR_CODE,
                    format!("Error parsing request: {}", e),
                );
            }
        };
        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match Request::from_value(&value) {
            Ok(request) => self.handle(&request),
            Err(e) => Response::failure(
                id,
                PROCESSING_ERROR_CODE,
                format!("Error processing request: {}", e),
            ),
        }
    }

    /// Handles one decoded request.
    pub fn handle(&self, request: &Request) -> Response {
        tracing::debug!(method = %request.method, "dispatching request");
        match self.call(&request.method, &request.params) {
            Ok(result) => Response::success(request.id.clone(), result),
            Err(e) => {
                tracing::warn!(method = %request.method, error = %e, "request failed");
                Response::failure(
                    request.id.clone(),
                    PROCESSING_ERROR_CODE,
                    format!("Error processing request: {}", e),
                )
            }
        }
    }

    fn call(&self, method: &str, params: &Map<String, Value>) -> Result<Value, RequestError> {
        match method {
            "validate" => {
                let spec = params
                    .get("api_spec")
                    .and_then(Value::as_str)
                    .ok_or(RequestError::MissingParameter("api_spec"))?;
                let rules = rule_names_param(params);
                let report = self.validator.validate(spec, &rules)?;
                to_json(&report)
            }
            "validateURLPath" => {
                let path = params
                    .get("url_path")
                    .and_then(Value::as_str)
                    .ok_or(RequestError::MissingParameter("url_path"))?;
                to_json(&self.validator.validate_url_path(path))
            }
            "getTools" => Ok(tools()),
            "getResources" => Ok(resources(&self.validator.rule_names())),
            "ping" => {
                *self.last_ping.lock().unwrap_or_else(|e| e.into_inner()) = Instant::now();
                Ok(Value::String("pong".to_string()))
            }
            other => Err(RequestError::UnknownMethod(other.to_string())),
        }
    }
}

/// String entries of the optional `rules` array; anything else is ignored.
fn rule_names_param(params: &Map<String, Value>) -> Vec<String> {
    params
        .get("rules")
        .and_then(Value::as_array)
        .map(|rules| {
            rules
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, RequestError> {
    serde_json::to_value(value).map_err(|e| RequestError::Internal(e.to_string()))
}

/// Tool descriptors advertised to assistant clients.
pub fn tools() -> Value {
    json!({
        "validate_api": {
            "description": "Validate a REST API against a set of rules",
            "input_schema": {
                "type": "object",
                "properties": {
                    "api_spec": {
                        "type": "string",
                        "description": "OpenAPI specification in YAML or JSON format, or a path to one",
                    },
                    "rules": {
                        "type": "array",
                        "description": "List of rules to validate against",
                        "items": { "type": "string" },
                    },
                },
                "required": ["api_spec"],
            },
        },
        "validate_url_path": {
            "description": "Validate a single URL path against REST API conventions",
            "input_schema": {
                "type": "object",
                "properties": {
                    "url_path": {
                        "type": "string",
                        "description": "URL path to validate (e.g., /api/v0/admin/cloudAgents/{datacenterId}/upgrades)",
                    },
                },
                "required": ["url_path"],
            },
        },
    })
}

/// Resource descriptors advertised to assistant clients.
pub fn resources(rule_names: &[String]) -> Value {
    json!({
        "rules": {
            "description": "Available validation rules",
            "names": rule_names,
        },
    })
}
