//! Error and warning types shared by the resolver, builder and wizard

use std::fmt;
use thiserror::Error;

/// Fatal errors raised while resolving or generating a project.
///
/// Every variant aborts the run before any file is written. Non-fatal
/// findings are reported as [`Warning`]s instead.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// An axis received a value it does not support
    #[error("unknown {axis} '{value}' (expected one of: {expected})")]
    UnknownValue {
        axis: &'static str,
        value: String,
        expected: String,
    },

    /// A framework-specific field was set for the other framework
    #[error("'{field}' cannot be combined with framework '{framework}'")]
    ConflictingFields {
        field: &'static str,
        framework: &'static str,
    },

    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    /// The draft was finished before every axis had an answer
    #[error("missing answer for '{0}'")]
    MissingAnswer(&'static str),

    /// The wizard tried to enter a step that is not in its step table
    #[error("unknown wizard step '{0}'")]
    UnknownStep(String),

    #[error("version catalog has no entry for package '{0}'")]
    MissingPackage(String),

    #[error("invalid version range '{range}' for package '{package}': {source}")]
    InvalidRange {
        package: String,
        range: String,
        #[source]
        source: semver::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A generated file references a path that is not part of the plan
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Category of a non-fatal compatibility finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    TypeScriptWithoutLinting,
    DeploymentWithoutGit,
    StyledComponentsAppRouter,
    JestManualTransform,
    ScanPathMismatch,
}

/// A compatibility warning surfaced to the operator; never blocks generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
