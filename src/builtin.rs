//! Built-in structural rules.
//!
//! These encode conventions that are too structural for the declarative
//! condition vocabulary.

use crate::error::RuleError;
use crate::primitives::{NON_OPERATION_KEYS, last_segment_is_parameter};
use crate::rule::{Rule, require_paths};
use crate::types::{Issue, RuleResult};
use serde_json::Value;

pub const METHOD_PATH_CONSISTENCY: &str = "method_path_consistency";
pub const SINGULAR_USER_RESOURCES: &str = "singular_user_resources";
pub const CUSTOM_ACTIONS: &str = "custom_actions";

/// All built-in rules, in registration order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(MethodPathConsistency),
        Box::new(SingularUserResources),
        Box::new(CustomActions),
    ]
}

// ─── Method/path consistency ────────────────────────────────────────────────

/// `POST` belongs on collections; `PUT`, `PATCH` and `DELETE` belong on
/// individual resources (paths ending in a `{param}` segment).
#[derive(Clone, Copy, Debug, Default)]
pub struct MethodPathConsistency;

impl MethodPathConsistency {
    fn check(path: &str, method: &str) -> Option<Issue> {
        let method = method.to_lowercase();
        let ends_with_param = last_segment_is_parameter(path);

        match method.as_str() {
            "post" if ends_with_param => Some(
                Issue::at_path(
                    path,
                    "POST should be used for collection paths, not for specific resources",
                )
                .with_method(method.as_str()),
            ),
            "put" | "patch" | "delete" if !ends_with_param => {
                let message = format!(
                    "{} should be used for specific resources, not for collections",
                    method.to_uppercase()
                );
                Some(Issue::at_path(path, message).with_method(method.as_str()))
            }
            _ => None,
        }
    }
}

impl Rule for MethodPathConsistency {
    fn name(&self) -> &str {
        METHOD_PATH_CONSISTENCY
    }

    fn description(&self) -> &str {
        "Validates that HTTP methods match the collection or resource shape of each path"
    }

    fn apply(&self, spec: &Value) -> Result<RuleResult, RuleError> {
        let paths = match require_paths(spec) {
            Ok(paths) => paths,
            Err(result) => return Ok(result),
        };

        let mut issues = Vec::new();
        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                continue;
            };
            for (method, operation) in item {
                if NON_OPERATION_KEYS.contains(&method.as_str()) || !operation.is_object() {
                    continue;
                }
                if let Some(issue) = Self::check(path, method) {
                    issues.push(issue);
                }
            }
        }

        Ok(RuleResult::from_issues(issues))
    }
}

// ─── Singular user resources ────────────────────────────────────────────────

/// Current-user resources are addressed through `/me/`, not `/users/{id}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingularUserResources;

impl Rule for SingularUserResources {
    fn name(&self) -> &str {
        SINGULAR_USER_RESOURCES
    }

    fn description(&self) -> &str {
        "Validates that user-specific resources use /me/ instead of /users/{id}"
    }

    fn apply(&self, spec: &Value) -> Result<RuleResult, RuleError> {
        let paths = match require_paths(spec) {
            Ok(paths) => paths,
            Err(result) => return Ok(result),
        };

        let issues = paths
            .keys()
            .filter(|path| path.contains("/users/") && !path.contains("/me/"))
            .map(|path| {
                Issue::at_path(
                    path.as_str(),
                    "User-specific resources should use /me/ instead of /users/{id}",
                )
            })
            .collect();

        Ok(RuleResult::from_issues(issues))
    }
}

// ─── Custom actions ─────────────────────────────────────────────────────────

/// Paths under `/actions/` must be invoked with `POST`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CustomActions;

impl Rule for CustomActions {
    fn name(&self) -> &str {
        CUSTOM_ACTIONS
    }

    fn description(&self) -> &str {
        "Validates that custom actions are exposed as POST operations"
    }

    fn apply(&self, spec: &Value) -> Result<RuleResult, RuleError> {
        let paths = match require_paths(spec) {
            Ok(paths) => paths,
            Err(result) => return Ok(result),
        };

        let issues = paths
            .iter()
            .filter(|(path, _)| path.contains("/actions/"))
            .filter_map(|(path, item)| item.as_object().map(|item| (path, item)))
            .filter(|(_, item)| !item.contains_key("post"))
            .map(|(path, _)| Issue::at_path(path.as_str(), "Custom actions should use POST method"))
            .collect();

        Ok(RuleResult::from_issues(issues))
    }
}
