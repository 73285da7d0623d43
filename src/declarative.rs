//! Declarative rules: data-defined lists of conditions.
//!
//! A [`RuleDefinition`] is validated and compiled into a [`DeclarativeRule`]
//! when it is loaded, so a malformed definition is rejected before it can be
//! registered and evaluation itself never fails.

use crate::enums::ConditionType;
use crate::error::{RuleError, RuleLoadError};
use crate::evaluate::{Condition, evaluate_condition};
use crate::rule::{Rule, require_paths};
use crate::types::{ConditionDefinition, RuleDefinition, RuleResult};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DISABLED_MESSAGE: &str = "Rule is disabled";

/// A rule whose logic is an ordered list of compiled conditions.
#[derive(Clone, Debug)]
pub struct DeclarativeRule {
    name: String,
    description: String,
    enabled: bool,
    conditions: Vec<Condition>,
    source: Option<PathBuf>,
}

impl DeclarativeRule {
    /// Validates and compiles a definition.
    pub fn from_definition(def: RuleDefinition) -> Result<Self, RuleLoadError> {
        if def.name.is_empty() {
            return Err(RuleLoadError::new("rule name is required"));
        }
        if def.description.is_empty() {
            return Err(RuleLoadError::new("rule description is required"));
        }
        if def.conditions.is_empty() {
            return Err(RuleLoadError::new("at least one condition is required"));
        }

        let conditions = def
            .conditions
            .iter()
            .enumerate()
            .map(|(i, c)| compile_condition(i, c))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DeclarativeRule {
            name: def.name,
            description: def.description,
            enabled: def.enabled,
            conditions,
            source: None,
        })
    }

    /// Parses and compiles a JSON rule definition.
    pub fn from_json(input: &str) -> Result<Self, RuleLoadError> {
        let def: RuleDefinition = serde_json::from_str(input)
            .map_err(|e| RuleLoadError::new(format!("error parsing JSON rule: {}", e)))?;
        Self::from_definition(def)
    }

    /// Reads, parses and compiles a JSON rule definition file.
    pub fn from_file(path: &Path) -> Result<Self, RuleLoadError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RuleLoadError::new(format!("error reading rule file: {}", e)).in_file(path)
        })?;
        let mut rule = Self::from_json(&content).map_err(|e| e.in_file(path))?;
        rule.source = Some(path.to_path_buf());
        Ok(rule)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// The file this rule was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }
}

impl Rule for DeclarativeRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn apply(&self, spec: &Value) -> Result<RuleResult, RuleError> {
        if !self.enabled {
            return Ok(RuleResult::skipped(DISABLED_MESSAGE));
        }

        let paths = match require_paths(spec) {
            Ok(paths) => paths,
            Err(result) => return Ok(result),
        };

        let issues = self
            .conditions
            .iter()
            .flat_map(|c| evaluate_condition(c, spec, paths))
            .collect();

        Ok(RuleResult::from_issues(issues))
    }
}

// ─── Condition compilation ──────────────────────────────────────────────────

fn compile_condition(index: usize, def: &ConditionDefinition) -> Result<Condition, RuleLoadError> {
    let fail = |msg: String| RuleLoadError::new(format!("condition {}: {}", index, msg));

    if def.condition_type.is_empty() {
        return Err(fail("type is required".to_string()));
    }
    if def.message.is_empty() {
        return Err(fail("message is required".to_string()));
    }
    let Some(condition_type) = ConditionType::from_tag(&def.condition_type) else {
        return Err(fail(format!("unknown type: {}", def.condition_type)));
    };

    let require = |value: &str, field: &str| {
        if value.is_empty() {
            Err(fail(format!("{} is required for {}", field, condition_type)))
        } else {
            Ok(value.to_string())
        }
    };
    let compile_pattern = || -> Result<Regex, RuleLoadError> {
        let pattern = require(&def.pattern, "pattern")?;
        Regex::new(&pattern).map_err(|e| fail(format!("invalid regex pattern: {}", e)))
    };

    let message = def.message.clone();
    let condition = match condition_type {
        ConditionType::PathPattern => Condition::PathPattern {
            pattern: compile_pattern()?,
            message,
        },
        ConditionType::ResourceNaming => Condition::ResourceNaming {
            pattern: compile_pattern()?,
            message,
        },
        ConditionType::MethodCheck => Condition::MethodCheck {
            path: require(&def.path, "path")?,
            method: require(&def.method, "method")?,
            message,
        },
        ConditionType::ParameterCheck => Condition::ParameterCheck {
            path: require(&def.path, "path")?,
            message,
        },
        ConditionType::SchemaField => Condition::SchemaField {
            field: require(&def.field, "field")?,
            format: (!def.format.is_empty()).then(|| def.format.clone()),
            message,
        },
    };
    Ok(condition)
}

// ─── Directory loading ──────────────────────────────────────────────────────

/// Returns `base` if it is free, otherwise the first free `base_1`, `base_2`, ...
pub fn unique_name(base: &str, taken: &BTreeSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|suffix| format!("{}_{}", base, suffix))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Loads every `.json` rule definition under `dir`, recursively, in lexical
/// path order, without following symbolic links to directories.
///
/// A missing directory is created and contributes no rules. The first
/// malformed file aborts the whole load. Rules whose names collide with an
/// earlier file are renamed `<name>_1`, `<name>_2`, ...
pub fn load_rules_dir(dir: &Path) -> Result<Vec<DeclarativeRule>, RuleLoadError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            RuleLoadError::new(format!("error creating rules directory: {}", e)).in_file(dir)
        })?;
        tracing::info!(dir = %dir.display(), "created empty rules directory");
        return Ok(Vec::new());
    }

    let files = collect_rule_files(dir)?;

    let mut taken = BTreeSet::new();
    let mut rules = Vec::with_capacity(files.len());
    for file in files {
        let mut rule = DeclarativeRule::from_file(&file)?;
        let name = unique_name(&rule.name, &taken);
        if name != rule.name {
            tracing::warn!(
                file = %file.display(),
                original = %rule.name,
                renamed = %name,
                "rule name already loaded; renaming"
            );
            rule.rename(name.clone());
        }
        taken.insert(name);
        rules.push(rule);
    }

    tracing::info!(dir = %dir.display(), count = rules.len(), "loaded declarative rules");
    Ok(rules)
}

/// Every `.json` file under `dir`, in lexical path order. Symbolic links are
/// never followed into, so a link back into the tree cannot loop.
fn collect_rule_files(dir: &Path) -> Result<Vec<PathBuf>, RuleLoadError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(dir).to_path_buf();
            RuleLoadError::new(format!("error walking rules directory: {}", e)).in_file(at)
        })?;
        if !entry.file_type().is_dir() && is_json_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
