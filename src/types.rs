use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::enums::RuleStatus;

// ─── Issue ──────────────────────────────────────────────────────────────────

/// A single convention violation.
///
/// Each originating check fills in whichever subset of locating fields it
/// knows about; the rest are omitted from the wire form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl Issue {
    /// An issue located at a path template.
    pub fn at_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Issue {
            path: Some(path.into()),
            message: message.into(),
            ..Issue::default()
        }
    }

    /// An issue concerning a schema field.
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Issue {
            field: Some(field.into()),
            message: message.into(),
            ..Issue::default()
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

// ─── RuleResult ─────────────────────────────────────────────────────────────

/// Outcome of applying one rule to one specification.
///
/// `issues` is non-empty only when `status` is `failed`; `message` carries
/// the reason for `skipped` and `error`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub status: RuleStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleResult {
    pub fn passed() -> Self {
        RuleResult {
            status: RuleStatus::Passed,
            issues: Vec::new(),
            message: None,
        }
    }

    /// `failed` when any issues were found, `passed` otherwise.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        if issues.is_empty() {
            RuleResult::passed()
        } else {
            RuleResult {
                status: RuleStatus::Failed,
                issues,
                message: None,
            }
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        RuleResult {
            status: RuleStatus::Skipped,
            issues: Vec::new(),
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        RuleResult {
            status: RuleStatus::Error,
            issues: Vec::new(),
            message: Some(message.into()),
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Per-rule results of one validation call, keyed by rule name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub results: BTreeMap<String, RuleResult>,
}

impl Report {
    pub fn get(&self, rule: &str) -> Option<&RuleResult> {
        self.results.get(rule)
    }

    /// `true` if any rule failed or errored.
    pub fn has_failures(&self) -> bool {
        self.results.values().any(|r| r.status.is_failure())
    }

    /// Total number of issues across all rules.
    pub fn issue_count(&self) -> usize {
        self.results.values().map(|r| r.issues.len()).sum()
    }
}

// ─── PathAnalysis ───────────────────────────────────────────────────────────

/// Structural facts inferred from a bare URL path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAnalysis {
    pub path: String,
    pub path_parameters: Vec<String>,
    pub ends_with_resource: bool,
    pub appropriate_methods: Vec<String>,
}

/// A [`Report`] for a synthesized specification, with the path analysis
/// that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReport {
    pub path_analysis: PathAnalysis,
    pub results: BTreeMap<String, RuleResult>,
}

impl PathReport {
    pub fn has_failures(&self) -> bool {
        self.results.values().any(|r| r.status.is_failure())
    }
}

// ─── Rule definitions ───────────────────────────────────────────────────────

/// On-disk shape of a declarative rule.
///
/// Every field defaults, and an explicit `null` reads as the default, so that
/// shape problems surface as load-time validation errors instead of opaque
/// deserialization failures.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: Vec<ConditionDefinition>,
}

/// On-disk shape of one condition. Which fields matter depends on `type`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub condition_type: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub pattern: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub path: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub method: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub field: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub format: String,
    /// Reserved for future condition types; currently unused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Reads `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
