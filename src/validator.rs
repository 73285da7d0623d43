//! The rule registry and validation engine.

use crate::config::ValidatorConfig;
use crate::declarative::{load_rules_dir, unique_name};
use crate::error::{RequestError, RuleError, RuleLoadError};
use crate::parse::resolve_spec;
use crate::rule::Rule;
use crate::synthesize::{analyze_path, synthesize_spec};
use crate::types::{PathReport, Report, RuleResult};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Owns every registered rule and runs them over specifications.
///
/// The registry is fixed once construction finishes. Validation only reads
/// it, so a `Validator` can be shared by reference across threads.
#[derive(Debug)]
pub struct Validator {
    rules: BTreeMap<String, Box<dyn Rule>>,
}

impl Validator {
    /// A validator with the built-in structural rules only.
    pub fn builtin() -> Self {
        let mut v = Validator {
            rules: BTreeMap::new(),
        };
        for rule in crate::builtin::builtin_rules() {
            v.register(rule);
        }
        v
    }

    /// Built-in rules plus the declarative rules in `config.rules_dir`.
    ///
    /// A rules directory that fails to load is logged and skipped; the
    /// validator then carries the built-in rules only.
    pub fn new(config: &ValidatorConfig) -> Self {
        match Self::try_new(config) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "error loading declarative rules; using built-in rules only");
                Self::builtin()
            }
        }
    }

    /// Like [`Validator::new`], but surfaces rule loading errors.
    pub fn try_new(config: &ValidatorConfig) -> Result<Self, RuleLoadError> {
        let mut v = Self::builtin();
        if let Some(dir) = &config.rules_dir {
            for rule in load_rules_dir(dir)? {
                v.register(Box::new(rule));
            }
        }
        Ok(v)
    }

    /// Adds one more rule during construction.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.register(Box::new(rule));
        self
    }

    /// Registers `rule`, renaming it `<name>_1`, `<name>_2`, ... if its name
    /// is already taken. Returns the registered name.
    fn register(&mut self, rule: Box<dyn Rule>) -> String {
        let taken: BTreeSet<String> = self.rules.keys().cloned().collect();
        let name = unique_name(rule.name(), &taken);
        let rule: Box<dyn Rule> = if name != rule.name() {
            tracing::warn!(
                original = rule.name(),
                renamed = %name,
                "rule name already registered; renaming"
            );
            Box::new(Renamed {
                name: name.clone(),
                inner: rule,
            })
        } else {
            rule
        };
        self.rules.insert(name.clone(), rule);
        name
    }

    /// Sorted names of every registered rule.
    pub fn rule_names(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    /// Every registered rule, sorted by name.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.values().map(|r| r.as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|r| r.as_ref())
    }

    /// Validates an API specification given as a file path or as YAML/JSON text.
    ///
    /// `rules` selects which rules to run; an empty slice runs all of them.
    /// Only an unparsable spec fails the call; per-rule problems land in the
    /// report.
    pub fn validate(&self, spec: &str, rules: &[String]) -> Result<Report, RequestError> {
        let spec = resolve_spec(spec)?;
        Ok(self.validate_spec(&spec, rules))
    }

    /// Validates an already-parsed specification tree.
    pub fn validate_spec(&self, spec: &Value, rules: &[String]) -> Report {
        let selected: Vec<&str> = if rules.is_empty() {
            self.rules.keys().map(String::as_str).collect()
        } else {
            rules.iter().map(String::as_str).collect()
        };

        let mut results = BTreeMap::new();
        for name in selected {
            let result = match self.rules.get(name) {
                None => RuleResult::error(format!("rule not found: {}", name)),
                Some(rule) => match rule.apply(spec) {
                    Ok(result) => result,
                    Err(e) => RuleResult::error(format!("error applying rule: {}", e)),
                },
            };
            tracing::debug!(
                rule = name,
                status = %result.status,
                issues = result.issues.len(),
                "applied rule"
            );
            results.insert(name.to_string(), result);
        }

        Report { results }
    }

    /// Validates a bare URL path by synthesizing a minimal specification for
    /// it and running every registered rule.
    pub fn validate_url_path(&self, path: &str) -> PathReport {
        let analysis = analyze_path(path);
        let spec = synthesize_spec(&analysis);
        let report = self.validate_spec(&spec, &[]);
        PathReport {
            path_analysis: analysis,
            results: report.results,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A rule registered under a different name than its own.
struct Renamed {
    name: String,
    inner: Box<dyn Rule>,
}

impl Rule for Renamed {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn apply(&self, spec: &Value) -> Result<RuleResult, RuleError> {
        self.inner.apply(spec)
    }
}
