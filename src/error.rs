use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Error kind for specification parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Io,
    Syntax,
    TypeMismatch,
}

/// Produced when an API specification cannot be read or decoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Produced when a rule definition is malformed.
///
/// A rule that fails to load is never registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleLoadError {
    /// The definition file, when the rule came from disk.
    pub file: Option<PathBuf>,
    pub message: String,
}

impl RuleLoadError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        RuleLoadError {
            file: None,
            message: message.into(),
        }
    }

    pub(crate) fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for RuleLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(
                f,
                "error loading rule from {}: {}",
                file.display(),
                self.message
            ),
            None => write!(f, "invalid rule definition: {}", self.message),
        }
    }
}

impl std::error::Error for RuleLoadError {}

/// Internal fault raised while a rule is being applied.
///
/// The engine isolates it into that rule's result; it never aborts a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleError {
    pub message: String,
}

impl RuleError {
    pub fn new(message: impl Into<String>) -> Self {
        RuleError {
            message: message.into(),
        }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuleError {}

/// Request-level failure: the whole call is aborted and no report is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestError {
    /// A required parameter is absent or has the wrong type.
    MissingParameter(&'static str),
    /// The API specification could not be parsed.
    Parse(ParseError),
    /// The envelope names a method the dispatcher does not know.
    UnknownMethod(String),
    /// The envelope itself is malformed.
    InvalidEnvelope(String),
    /// A result could not be encoded.
    Internal(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingParameter(name) => {
                write!(f, "missing or invalid {} parameter", name)
            }
            RequestError::Parse(e) => write!(f, "error parsing API spec: {}", e),
            RequestError::UnknownMethod(m) => write!(f, "unknown method: {}", m),
            RequestError::InvalidEnvelope(m) => write!(f, "invalid request: {}", m),
            RequestError::Internal(m) => write!(f, "internal error: {}", m),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for RequestError {
    fn from(e: ParseError) -> Self {
        RequestError::Parse(e)
    }
}

/// Serialization error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeError {
    pub message: String,
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SerializeError {}
