//! Closed enumerations used throughout the report and rule model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of applying one rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    Passed,
    Failed,
    Skipped,
    Error,
}

impl RuleStatus {
    /// `true` for outcomes that should fail a CI gate.
    pub fn is_failure(self) -> bool {
        matches!(self, RuleStatus::Failed | RuleStatus::Error)
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleStatus::Passed => "passed",
            RuleStatus::Failed => "failed",
            RuleStatus::Skipped => "skipped",
            RuleStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// The fixed vocabulary of declarative condition types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    PathPattern,
    MethodCheck,
    ParameterCheck,
    ResourceNaming,
    SchemaField,
}

impl ConditionType {
    pub const ALL: [ConditionType; 5] = [
        ConditionType::PathPattern,
        ConditionType::MethodCheck,
        ConditionType::ParameterCheck,
        ConditionType::ResourceNaming,
        ConditionType::SchemaField,
    ];

    /// The tag as written in rule definition files.
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionType::PathPattern => "path_pattern",
            ConditionType::MethodCheck => "method_check",
            ConditionType::ParameterCheck => "parameter_check",
            ConditionType::ResourceNaming => "resource_naming",
            ConditionType::SchemaField => "schema_field",
        }
    }

    /// Looks up a tag; `None` for anything outside the vocabulary.
    pub fn from_tag(tag: &str) -> Option<ConditionType> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
