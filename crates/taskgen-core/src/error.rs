//! Error types for taskgen

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using TaskgenError
pub type Result<T> = std::result::Result<T, TaskgenError>;

/// Main error type for taskgen operations
#[derive(Debug, Error)]
pub enum TaskgenError {
    /// Malformed AutoRun structure in a workload file
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Required input file is absent
    #[error("File {} not found", .0.display())]
    NotFound(PathBuf),

    /// External tool invocation failed
    #[error("Command `{command}` failed: {stderr}")]
    ExternalTool { command: String, stderr: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural validation errors for a workload's AutoRun section.
///
/// Every variant names the offending file so a workload author can fix
/// the YAML directly. A schema error aborts the whole run; a malformed
/// workload is a repository-wide defect, not a per-file skip.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// AutoRun must be a sequence of blocks
    #[error("{}: AutoRun must be a sequence, instead got {found}", .path.display())]
    AutoRunNotSequence { path: PathBuf, found: String },

    /// AutoRun, if present, must contain at least one block
    #[error("{}: AutoRun must not be an empty sequence", .path.display())]
    AutoRunEmpty { path: PathBuf },

    /// Each AutoRun block needs a When mapping
    #[error(
        "{}: AutoRun block {index} must be a mapping with a non-empty 'When' mapping, \
         instead got {found}",
        .path.display()
    )]
    InvalidWhen {
        path: PathBuf,
        index: usize,
        found: String,
    },

    /// ThenRun must be a sequence
    #[error("{}: ThenRun must be a sequence, instead got {found}", .path.display())]
    ThenRunNotSequence { path: PathBuf, found: String },

    /// Each ThenRun entry must be a mapping with exactly one key/value pair
    #[error(
        "{}: ThenRun entry {index} must be a mapping with exactly one key/value pair, \
         instead got {found}",
        .path.display()
    )]
    InvalidThenRunEntry {
        path: PathBuf,
        index: usize,
        found: String,
    },

    /// Workload file is not under the src/workloads tree
    #[error("Invalid workload path {}: expected a path under src/workloads/", .path.display())]
    InvalidWorkloadPath { path: PathBuf },
}

/// Describes a YAML value's type for error messages.
pub(crate) fn yaml_type_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
