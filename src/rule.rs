//! The rule contract shared by structural and declarative rules.

use crate::error::RuleError;
use crate::types::RuleResult;
use serde_json::{Map, Value};

pub const INVALID_SPEC_MESSAGE: &str = "invalid API spec";
pub const MISSING_PATHS_MESSAGE: &str = "API spec does not have paths";

/// A named unit of convention-checking logic.
///
/// Rules are registered once when a [`crate::Validator`] is built and are
/// then shared read-only across every validation call, so `apply` must not
/// depend on mutable state.
pub trait Rule: Send + Sync {
    /// Unique registry key.
    fn name(&self) -> &str;

    /// Human-readable summary of the convention.
    fn description(&self) -> &str;

    /// Checks `spec` and reports the outcome.
    ///
    /// Convention violations and unusable specs are reported through the
    /// returned [`RuleResult`]; `Err` is reserved for faults inside the rule.
    fn apply(&self, spec: &Value) -> Result<RuleResult, RuleError>;
}

impl std::fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

/// Extracts the `paths` mapping, or the error result every rule reports when
/// the spec is null or has no usable `paths`.
pub(crate) fn require_paths(spec: &Value) -> Result<&Map<String, Value>, RuleResult> {
    let Some(root) = spec.as_object() else {
        return Err(RuleResult::error(INVALID_SPEC_MESSAGE));
    };
    root.get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| RuleResult::error(MISSING_PATHS_MESSAGE))
}
