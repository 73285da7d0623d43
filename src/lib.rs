//! Validate REST API specifications against organizational REST conventions.
//!
//! A [`Validator`] owns a registry of [`Rule`]s: built-in structural rules
//! plus declarative rules loaded from JSON definition files. It runs them over
//! an OpenAPI document (YAML or JSON) or over a bare URL path, and returns a
//! pass/fail [`Report`] per rule.
//!
//! ```text
//! spec text | file ─→ resolve_spec ─→ Value ─→ Rule::apply × N ─→ Report
//! url path ─→ analyze_path ─→ synthesize_spec ─┘                  └→ PathReport
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! let validator = restlint::Validator::builtin();
//! let spec = r#"
//! openapi: 3.0.0
//! paths:
//!   /widgets:
//!     post: {}
//!   /widgets/{id}:
//!     get: {}
//!     put: {}
//! "#;
//!
//! let report = validator.validate(spec, &[]).expect("spec parses");
//! assert!(!report.has_failures());
//!
//! let report = validator.validate_url_path("/users/{id}");
//! assert_eq!(report.path_analysis.path_parameters, vec!["id"]);
//! ```
//!
//! # Declarative rules
//!
//! ```json
//! {
//!   "name": "audit_fields",
//!   "description": "Resources carry audit timestamps",
//!   "enabled": true,
//!   "conditions": [
//!     { "type": "schema_field", "field": "createdTime", "format": "date-time",
//!       "message": "Resources should have a createdTime field" }
//!   ]
//! }
//! ```
//!
//! Condition types: `path_pattern`, `method_check`, `parameter_check`,
//! `resource_naming`, `schema_field`.

pub mod builtin;
pub mod config;
pub mod declarative;
pub mod enums;
pub mod error;
pub mod evaluate;
pub mod parse;
pub mod primitives;
pub mod rpc;
pub mod rule;
pub mod serialize;
pub mod synthesize;
pub mod types;
pub mod validator;

pub use config::ValidatorConfig;
pub use declarative::DeclarativeRule;
pub use enums::*;
pub use error::*;
pub use rule::Rule;
pub use types::*;
pub use validator::Validator;

// Re-export entry-point functions at the crate root for convenience.
pub use parse::{parse_spec, resolve_spec};
pub use synthesize::{analyze_path, synthesize_spec};

/// Convenience entry point: validate `spec` (text or file path) with the
/// built-in rules only.
pub fn validate(spec: &str) -> Result<Report, RequestError> {
    Validator::builtin().validate(spec, &[])
}
