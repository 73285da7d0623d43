//! Engine configuration.

use std::path::PathBuf;

/// Directory searched for declarative rules when nothing else is configured.
pub const DEFAULT_RULES_DIR: &str = "config/rules";

/// Environment variable overriding the rules directory.
pub const RULES_DIR_ENV: &str = "RESTLINT_RULES_DIR";

/// Settings used to build a [`crate::Validator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Directory of declarative rule files; `None` registers built-ins only.
    pub rules_dir: Option<PathBuf>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            rules_dir: Some(PathBuf::from(DEFAULT_RULES_DIR)),
        }
    }
}

impl ValidatorConfig {
    /// Built-in rules only.
    pub fn builtin_only() -> Self {
        ValidatorConfig { rules_dir: None }
    }

    pub fn with_rules_dir(dir: impl Into<PathBuf>) -> Self {
        ValidatorConfig {
            rules_dir: Some(dir.into()),
        }
    }

    /// Defaults, with the rules directory taken from `RESTLINT_RULES_DIR`
    /// when it is set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(RULES_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::with_rules_dir(dir),
            _ => Self::default(),
        }
    }
}
