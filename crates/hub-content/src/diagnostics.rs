//! Validation diagnostics
//!
//! Every per-item failure in the pipeline becomes a [`Diagnostic`]: the
//! source path it was found in, plus an [`IssueKind`] carrying enough
//! context (offending field, token, asset) to act on without re-running.
//! Diagnostics accumulate; they never abort processing of sibling items.
//!
//! Each kind has a stable machine-readable code. The rendered message is
//! human-first; the code is the part downstream tooling may match on.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

/// What went wrong with one content item
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssueKind {
    /// Content does not match its JSON Schema (includes YAML syntax errors
    /// found before the schema could even be applied)
    #[error("schema violation: {detail}")]
    SchemaViolation {
        /// Violation message with the offending instance path
        detail: String,
    },

    /// A referenced asset (icon file, required content file) is absent
    #[error("missing asset: {}", asset.display())]
    MissingAsset {
        /// Path of the absent asset
        asset: PathBuf,
    },

    /// A step references a tool id with no definition
    #[error("step '{step_id}' references unknown tool '{tool_name}'")]
    UnknownTool {
        /// Step whose binding failed to resolve
        step_id: String,
        /// The unresolvable tool id
        tool_name: String,
    },

    /// A prompt uses a `{{name}}` placeholder with no declared parameter
    #[error("step '{step_id}' uses undefined parameter '{name}'")]
    UndefinedParameterReference {
        /// Step whose prompt contains the placeholder
        step_id: String,
        /// The undeclared parameter name
        name: String,
    },

    /// A declared parameter is referenced by no step prompt
    #[error("unused parameter '{name}'")]
    UnusedParameter {
        /// The dead parameter name
        name: String,
    },

    /// A `#id` token points at no step in the same recipe
    #[error("field '{field}' references unknown step '{token}'")]
    UnknownStepReference {
        /// Field the token was found in
        field: String,
        /// The dangling step id
        token: String,
    },

    /// A file exists but could not be read
    #[error("io error: {detail}")]
    Io {
        /// Underlying error text
        detail: String,
    },

    /// A directory name or tag is not URL-friendly
    #[error("{field} '{value}' is not url-friendly (expected ^[a-z0-9-]+$)")]
    BadSlug {
        /// Which name is malformed
        field: String,
        /// The offending value
        value: String,
    },
}

impl IssueKind {
    /// Stable diagnostic code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SchemaViolation { .. } => "E100",
            Self::MissingAsset { .. } => "E101",
            Self::UnknownTool { .. } => "E102",
            Self::UndefinedParameterReference { .. } => "E103",
            Self::UnusedParameter { .. } => "E104",
            Self::UnknownStepReference { .. } => "E105",
            Self::Io { .. } => "E106",
            Self::BadSlug { .. } => "E107",
        }
    }
}

/// One reported problem, anchored to the file it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Source file (or directory) the problem belongs to
    pub path: PathBuf,
    /// What went wrong
    pub kind: IssueKind,
}

impl Diagnostic {
    /// Create a diagnostic for a source path
    pub fn new(path: impl Into<PathBuf>, kind: IssueKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Stable diagnostic code
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code(), self.path.display(), self.kind)
    }
}
